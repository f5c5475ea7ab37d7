use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A key in the normalized field vocabulary shared by every engine.
///
/// Variant order is the declaration order: converters emit clauses in
/// exactly this order, so the fallback query always keeps the same prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Single IP address
    Ip,
    /// Network in CIDR notation
    Cidr,
    /// Service port
    Port,
    /// Domain name
    Domain,
    /// Raw banner text
    Banner,
    /// HTTP request path
    HttpPath,
    /// TLS certificate common name
    #[serde(rename = "tlsCN")]
    TlsCn,
    /// TLS subject alternative name
    #[serde(rename = "tlsSAN")]
    TlsSan,
    /// TLS certificate issuer
    TlsIssuer,
    /// TLS certificate subject
    TlsSubject,
    /// Autonomous system number, with or without the `AS` prefix
    Asn,
    /// Owning organization
    Org,
    /// Transport or service protocol
    Protocol,
    /// Two-letter country code
    Country,
    /// Full country name (Censys only)
    CountryFull,
    /// FOFA-specific country code
    FofaCountry,
    /// Software product
    Product,
    /// Page title
    Title,
    /// Software version
    Version,
    /// CVE identifier
    Vuln,
    /// Expired TLS certificate flag
    ExpiredCert,
    /// HTTP page title
    HttpTitle,
    /// HTTP status code
    HttpStatus,
    /// HTTP `Server` header
    ServerHeader,
    /// Operating system
    Os,
    /// Free text within TLS data
    Ssl,
    /// Reverse DNS host name
    Hostname,
    /// City name
    City,
}

impl Field {
    /// Every field, in declaration order.
    pub const ALL: [Self; 28] = [
        Self::Ip,
        Self::Cidr,
        Self::Port,
        Self::Domain,
        Self::Banner,
        Self::HttpPath,
        Self::TlsCn,
        Self::TlsSan,
        Self::TlsIssuer,
        Self::TlsSubject,
        Self::Asn,
        Self::Org,
        Self::Protocol,
        Self::Country,
        Self::CountryFull,
        Self::FofaCountry,
        Self::Product,
        Self::Title,
        Self::Version,
        Self::Vuln,
        Self::ExpiredCert,
        Self::HttpTitle,
        Self::HttpStatus,
        Self::ServerHeader,
        Self::Os,
        Self::Ssl,
        Self::Hostname,
        Self::City,
    ];

    /// The wire name used as the key in a field mapping.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Cidr => "cidr",
            Self::Port => "port",
            Self::Domain => "domain",
            Self::Banner => "banner",
            Self::HttpPath => "httpPath",
            Self::TlsCn => "tlsCN",
            Self::TlsSan => "tlsSAN",
            Self::TlsIssuer => "tlsIssuer",
            Self::TlsSubject => "tlsSubject",
            Self::Asn => "asn",
            Self::Org => "org",
            Self::Protocol => "protocol",
            Self::Country => "country",
            Self::CountryFull => "countryFull",
            Self::FofaCountry => "fofaCountry",
            Self::Product => "product",
            Self::Title => "title",
            Self::Version => "version",
            Self::Vuln => "vuln",
            Self::ExpiredCert => "expiredCert",
            Self::HttpTitle => "httpTitle",
            Self::HttpStatus => "httpStatus",
            Self::ServerHeader => "serverHeader",
            Self::Os => "os",
            Self::Ssl => "ssl",
            Self::Hostname => "hostname",
            Self::City => "city",
        }
    }

    /// Short label for forms and tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ip => "IP address",
            Self::Cidr => "CIDR range",
            Self::Port => "Port",
            Self::Domain => "Domain",
            Self::Banner => "Banner",
            Self::HttpPath => "HTTP path",
            Self::TlsCn => "TLS common name",
            Self::TlsSan => "TLS SAN",
            Self::TlsIssuer => "TLS issuer",
            Self::TlsSubject => "TLS subject",
            Self::Asn => "ASN",
            Self::Org => "Organization",
            Self::Protocol => "Protocol",
            Self::Country => "Country code",
            Self::CountryFull => "Country name",
            Self::FofaCountry => "FOFA country",
            Self::Product => "Product",
            Self::Title => "Title",
            Self::Version => "Version",
            Self::Vuln => "CVE",
            Self::ExpiredCert => "Expired certificate",
            Self::HttpTitle => "HTTP title",
            Self::HttpStatus => "HTTP status",
            Self::ServerHeader => "Server header",
            Self::Os => "Operating system",
            Self::Ssl => "SSL text",
            Self::Hostname => "Hostname",
            Self::City => "City",
        }
    }

    /// Returns false for the hint fields that only carry platform-specific
    /// alternatives (`protocol`, `countryFull`, `fofaCountry`).
    #[must_use]
    pub const fn is_displayable(self) -> bool {
        !matches!(self, Self::Protocol | Self::CountryFull | Self::FofaCountry)
    }

    /// Look up a field by its wire name. Names are case-sensitive.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = crate::QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| crate::QueryError::InvalidFields(format!("unknown field: {s}")))
    }
}
