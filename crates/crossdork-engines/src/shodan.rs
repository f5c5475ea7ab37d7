//! Shodan filter syntax.
//!
//! Clauses are space-separated (implicit AND), multi-value groups use `OR`,
//! and ports collapse into Shodan's comma list (`port:80,443`).

use crate::clause::{assemble, build_clause, ClauseRule, Dialect, Multi, ValueKind};
use crate::Converter;
use crossdork_core::{ConversionResult, EngineDescriptor, Field, NormalizedFields, Result};

/// Shodan engine metadata.
pub const DESCRIPTOR: EngineDescriptor = EngineDescriptor {
    id: "shodan",
    name: "Shodan",
    docs_url: "https://www.shodan.io/search/filters",
};

/// Shodan boolean tokens.
pub const DIALECT: Dialect = Dialect {
    engine: "shodan",
    and: " ",
    or: " OR ",
    and_label: "AND",
};

/// Shodan field table. `countryFull` and `fofaCountry` have no Shodan
/// equivalent and are ignored.
pub const RULES: &[ClauseRule] = &[
    ClauseRule::new(Field::Ip, &["{v}"]),
    ClauseRule::new(Field::Cidr, &["net:{v}"]),
    ClauseRule::new(Field::Port, &["port:{v}"]).multi(Multi::Joined(",")),
    ClauseRule::new(Field::Domain, &["hostname:{v}"]),
    ClauseRule::new(Field::Banner, &["\"{v}\""]),
    ClauseRule::new(Field::HttpPath, &["http.html:\"{v}\""]),
    ClauseRule::new(Field::TlsCn, &["ssl.cert.subject.cn:\"{v}\""]),
    ClauseRule::new(Field::TlsSan, &["ssl:\"{v}\""]),
    ClauseRule::new(Field::TlsIssuer, &["ssl.cert.issuer.cn:\"{v}\""]),
    ClauseRule::new(Field::TlsSubject, &["ssl.cert.subject.cn:\"{v}\""]),
    ClauseRule::new(Field::Asn, &["asn:{v}"]).kind(ValueKind::Asn),
    ClauseRule::new(Field::Org, &["org:\"{v}\""]),
    ClauseRule::new(Field::Protocol, &["shodan.module:{v}"]),
    ClauseRule::new(Field::Country, &["country:\"{v}\""]),
    ClauseRule::new(Field::Product, &["product:\"{v}\""]),
    ClauseRule::new(Field::Title, &["title:\"{v}\""]),
    ClauseRule::new(Field::Version, &["version:\"{v}\""]),
    ClauseRule::new(Field::Vuln, &["vuln:{v}"]),
    ClauseRule::new(Field::ExpiredCert, &["ssl.cert.expired:true"]).kind(ValueKind::Flag),
    ClauseRule::new(Field::HttpTitle, &["http.title:\"{v}\""]),
    ClauseRule::new(Field::HttpStatus, &["http.status:{v}"]),
    ClauseRule::new(Field::ServerHeader, &["\"Server: {v}\""]),
    ClauseRule::new(Field::Os, &["os:\"{v}\""]),
    ClauseRule::new(Field::Ssl, &["ssl:\"{v}\""]),
    ClauseRule::new(Field::Hostname, &["hostname:\"{v}\""]),
    ClauseRule::new(Field::City, &["city:\"{v}\""]),
];

/// Converter for Shodan search queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShodanConverter;

impl Converter for ShodanConverter {
    fn descriptor(&self) -> EngineDescriptor {
        DESCRIPTOR
    }

    fn convert(&self, fields: &NormalizedFields) -> Result<ConversionResult> {
        let mut clauses = Vec::new();
        for rule in RULES {
            if let Some(clause) = build_clause(&DIALECT, rule, fields)? {
                clauses.push(clause);
            }
        }
        Ok(assemble(&DIALECT, &clauses))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clause::{NO_FIELDS_NOTE, SIMPLIFIED_NOTE};

    fn convert(fields: &NormalizedFields) -> ConversionResult {
        ShodanConverter.convert(fields).unwrap()
    }

    #[test]
    fn test_empty_fields() {
        let result = convert(&NormalizedFields::new());
        assert_eq!(result.query, "*");
        assert_eq!(result.notes, vec![NO_FIELDS_NOTE]);
        assert!(result.fallback.is_none());
    }

    #[test]
    fn test_single_fields() {
        let cases = [
            (Field::Ip, "8.8.8.8", "8.8.8.8"),
            (Field::Cidr, "10.0.0.0/8", "net:10.0.0.0/8"),
            (Field::Domain, "example.com", "hostname:example.com"),
            (Field::Org, "Google LLC", "org:\"Google LLC\""),
            (Field::Country, "US", "country:\"US\""),
            (Field::Title, "Login", "title:\"Login\""),
            (Field::HttpTitle, "Dashboard", "http.title:\"Dashboard\""),
            (Field::Vuln, "CVE-2021-44228", "vuln:CVE-2021-44228"),
            (Field::ServerHeader, "nginx", "\"Server: nginx\""),
        ];
        for (field, value, expected) in cases {
            let result = convert(&NormalizedFields::new().with(field, value));
            assert_eq!(result.query, expected, "field {field}");
            assert!(result.notes.is_empty());
        }
    }

    #[test]
    fn test_ports_comma_joined() {
        let result = convert(&NormalizedFields::new().with(Field::Port, vec![80, 443]));
        assert_eq!(result.query, "port:80,443");
    }

    #[test]
    fn test_multi_value_or_group() {
        let result = convert(&NormalizedFields::new().with(Field::Hostname, vec!["a.com", "b.com"]));
        assert_eq!(result.query, "(hostname:\"a.com\" OR hostname:\"b.com\")");
    }

    #[test]
    fn test_asn_prefix_stripped() {
        let result = convert(&NormalizedFields::new().with(Field::Asn, "AS13335"));
        assert_eq!(result.query, "asn:13335");
    }

    #[test]
    fn test_expired_cert_flag() {
        let result = convert(&NormalizedFields::new().with(Field::ExpiredCert, true));
        assert_eq!(result.query, "ssl.cert.expired:true");
    }

    #[test]
    fn test_country_hints_ignored() {
        let fields = NormalizedFields::new()
            .with(Field::Country, "DE")
            .with(Field::CountryFull, "Germany")
            .with(Field::FofaCountry, "DE");
        assert_eq!(convert(&fields).query, "country:\"DE\"");
    }

    #[test]
    fn test_port_and_title_not_combined() {
        let fields = NormalizedFields::new()
            .with(Field::Port, 8080)
            .with(Field::Title, "Jenkins");
        let result = convert(&fields);
        assert_eq!(result.query, "port:8080 title:\"Jenkins\"");
        assert_eq!(result.notes, vec!["Multiple filters combined with AND logic"]);
    }

    #[test]
    fn test_fallback_after_six_clauses() {
        let fields = NormalizedFields::new()
            .with(Field::Ip, "1.2.3.4")
            .with(Field::Port, 22)
            .with(Field::Domain, "example.com")
            .with(Field::Org, "Acme")
            .with(Field::Product, "OpenSSH")
            .with(Field::City, "Paris");
        let result = convert(&fields);
        assert_eq!(
            result.query,
            "1.2.3.4 port:22 hostname:example.com org:\"Acme\" product:\"OpenSSH\" city:\"Paris\""
        );
        assert_eq!(
            result.fallback.as_deref(),
            Some("1.2.3.4 port:22 hostname:example.com")
        );
        assert!(result.notes.iter().any(|n| n == SIMPLIFIED_NOTE));
    }

    #[test]
    fn test_five_clauses_no_fallback() {
        let fields = NormalizedFields::new()
            .with(Field::Ip, "1.2.3.4")
            .with(Field::Port, 22)
            .with(Field::Domain, "example.com")
            .with(Field::Org, "Acme")
            .with(Field::City, "Paris");
        assert!(convert(&fields).fallback.is_none());
    }

    #[test]
    fn test_every_displayable_field_has_rule() {
        for field in Field::ALL.into_iter().filter(|f| f.is_displayable()) {
            assert!(RULES.iter().any(|r| r.field == field), "missing {field}");
        }
    }
}
