//! Censys Query Language (CenQL).
//!
//! CenQL paths are namespaced: host data lives under `host.*`, web
//! properties under `web.*`, certificates under `cert.*`. Fields that exist
//! in both the host and web namespaces (product, version, titles, vulns)
//! match on either path. Ports and protocols use CenQL's set syntax.
//!
//! Two cross-field rules apply:
//!
//! - `port` + `title` scope the title match to the requested ports:
//!   `host.services: (port: 80 and endpoints.http.html_title: "T") or web.endpoints.http.html_title: "T"`
//! - `countryFull` replaces the code-based `country` filter.

use crate::clause::{assemble, build_clause, build_from_values, ClauseRule, Dialect, Multi, ValueKind};
use crate::Converter;
use crossdork_core::{ConversionResult, EngineDescriptor, Field, NormalizedFields, Result};

/// Censys engine metadata.
pub const DESCRIPTOR: EngineDescriptor = EngineDescriptor {
    id: "censys",
    name: "Censys",
    docs_url: "https://docs.censys.com/docs/censys-query-language",
};

/// CenQL boolean tokens.
pub const DIALECT: Dialect = Dialect {
    engine: "censys",
    and: " and ",
    or: " or ",
    and_label: "and",
};

const TITLE_PATHS: &[&str] = &[
    "web.endpoints.http.html_title: \"{v}\"",
    "host.services.endpoints.http.html_title: \"{v}\"",
];

/// Censys field table. `fofaCountry` has no Censys equivalent and is ignored.
pub const RULES: &[ClauseRule] = &[
    ClauseRule::new(Field::Ip, &["host.ip: \"{v}\""]),
    ClauseRule::new(Field::Cidr, &["host.ip: \"{v}\""]),
    ClauseRule::new(Field::Port, &["host.services.port:{v}"])
        .multi(Multi::Set("host.services.port:")),
    ClauseRule::new(Field::Domain, &["host.dns.names: \"{v}\""]),
    ClauseRule::new(Field::Banner, &["host.services.banner: \"{v}\""]),
    ClauseRule::new(Field::HttpPath, &["host.services.endpoints.path: \"{v}\""]),
    ClauseRule::new(Field::TlsCn, &["cert.parsed.subject.common_name: \"{v}\""]),
    ClauseRule::new(Field::TlsSan, &["cert.names: \"{v}\""]),
    ClauseRule::new(Field::TlsIssuer, &["cert.parsed.issuer_dn: \"{v}\""]),
    ClauseRule::new(Field::TlsSubject, &["cert.parsed.subject_dn: \"{v}\""]),
    ClauseRule::new(Field::Asn, &["host.autonomous_system.asn: {v}"]).kind(ValueKind::Asn),
    ClauseRule::new(Field::Org, &["host.autonomous_system.name: \"{v}\""]),
    ClauseRule::new(Field::Protocol, &["host.services.protocol:\"{v}\""])
        .kind(ValueKind::Upper)
        .multi(Multi::Set("host.services.protocol:")),
    ClauseRule::new(Field::Country, &["host.location.country_code:\"{v}\""]),
    ClauseRule::new(Field::CountryFull, &["host.location.country:\"{v}\""]),
    ClauseRule::new(
        Field::Product,
        &[
            "host.services.software.product: \"{v}\"",
            "web.software.product: \"{v}\"",
        ],
    ),
    ClauseRule::new(Field::Title, TITLE_PATHS),
    ClauseRule::new(
        Field::Version,
        &[
            "host.services.software.version: \"{v}\"",
            "web.software.version: \"{v}\"",
        ],
    ),
    ClauseRule::new(
        Field::Vuln,
        &["host.services.vulns.id:\"{v}\"", "web.vulns.id:\"{v}\""],
    ),
    ClauseRule::new(
        Field::ExpiredCert,
        &["cert.parsed.validity_period.not_after <= \"now\""],
    )
    .kind(ValueKind::Flag),
    ClauseRule::new(Field::HttpTitle, TITLE_PATHS),
    ClauseRule::new(
        Field::HttpStatus,
        &["host.services.endpoints.http.status_code: {v}"],
    ),
    ClauseRule::new(
        Field::ServerHeader,
        &["host.services.endpoints.http.headers: (key: \"Server\" and value: \"{v}\")"],
    ),
    ClauseRule::new(Field::Os, &["host.operating_system.product: \"{v}\""]),
    ClauseRule::new(Field::Ssl, &["host.services.cert.names: \"{v}\""]),
    ClauseRule::new(Field::Hostname, &["host.dns.reverse_dns.names: \"{v}\""]),
    ClauseRule::new(Field::City, &["host.location.city: \"{v}\""]),
];

// Paths used inside the `host.services: (...)` block of the port+title rule.
const SCOPED_PORT: ClauseRule = ClauseRule::new(Field::Port, &["port: {v}"]).multi(Multi::Set("port: "));
const SCOPED_TITLE: ClauseRule = ClauseRule::new(Field::Title, &["endpoints.http.html_title: \"{v}\""]);
const WEB_TITLE: ClauseRule = ClauseRule::new(Field::Title, &["web.endpoints.http.html_title: \"{v}\""]);

/// Converter for Censys (CenQL) queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct CensysConverter;

impl CensysConverter {
    /// Title match restricted to the services on the requested ports, or
    /// any web property with that title.
    fn port_scoped_title(fields: &NormalizedFields) -> Result<Option<String>> {
        let ports = SCOPED_PORT.values(fields);
        let titles = SCOPED_TITLE.values(fields);
        if ports.is_empty() || titles.is_empty() {
            return Ok(None);
        }

        let port = build_from_values(&DIALECT, &SCOPED_PORT, &ports)?;
        let title = build_from_values(&DIALECT, &SCOPED_TITLE, &titles)?;
        let web = build_from_values(&DIALECT, &WEB_TITLE, &titles)?;
        Ok(Some(format!(
            "(host.services: ({port} and {title}) or {web})"
        )))
    }
}

impl Converter for CensysConverter {
    fn descriptor(&self) -> EngineDescriptor {
        DESCRIPTOR
    }

    fn convert(&self, fields: &NormalizedFields) -> Result<ConversionResult> {
        let scoped_title = fields.has(Field::Port) && fields.has(Field::Title);
        let mut clauses = Vec::new();

        for rule in RULES {
            let clause = match rule.field {
                Field::Port if scoped_title => Self::port_scoped_title(fields)?,
                Field::Title if scoped_title => None,
                Field::Country if fields.has(Field::CountryFull) => None,
                _ => build_clause(&DIALECT, rule, fields)?,
            };
            clauses.extend(clause);
        }

        Ok(assemble(&DIALECT, &clauses))
    }
}
