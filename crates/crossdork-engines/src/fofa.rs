//! FOFA query syntax.
//!
//! Clauses are `key="value"` pairs joined with `&&`; multi-value groups use
//! `||`. FOFA has no CVE filter, cannot combine a port with a title match,
//! and needs the `ip_ports`/`ip_country` pair when several ports and a
//! country are requested together so both are measured on the same IP.

use crate::clause::{assemble, build_clause, ClauseRule, Dialect, Multi, ValueKind};
use crate::Converter;
use crossdork_core::{ConversionResult, EngineDescriptor, Field, NormalizedFields, Result};

/// FOFA engine metadata.
pub const DESCRIPTOR: EngineDescriptor = EngineDescriptor {
    id: "fofa",
    name: "FOFA",
    docs_url: "https://en.fofa.info/api",
};

/// FOFA boolean tokens.
pub const DIALECT: Dialect = Dialect {
    engine: "fofa",
    and: " && ",
    or: " || ",
    and_label: "&&",
};

/// Query text returned when a CVE is the only filter.
pub const VULN_ONLY_QUERY: &str =
    "FOFA does not support CVE search. Use Shodan (vuln:CVE-XXXX-XXXX) or Censys to filter by vulnerability.";

/// Note attached whenever a CVE filter was requested.
pub const VULN_UNSUPPORTED_NOTE: &str = "CVE filtering is not supported by FOFA";

/// Note attached when the CVE filter was left out of a longer query.
pub const VULN_OMITTED_NOTE: &str =
    "CVE filtering is not supported by FOFA; the vuln field was left out of the query";

const COUNTRY: ClauseRule = ClauseRule::new(Field::Country, &["country=\"{v}\""]);
const IP_COUNTRY: ClauseRule = ClauseRule::new(Field::Country, &["ip_country=\"{v}\""]);
const IP_PORTS: ClauseRule =
    ClauseRule::new(Field::Port, &["ip_ports=\"{v}\""]).multi(Multi::Joined(","));

/// FOFA field table. `vuln` is absent on purpose, `fofaCountry` feeds the
/// country clause and `countryFull` is ignored.
pub const RULES: &[ClauseRule] = &[
    ClauseRule::new(Field::Ip, &["ip=\"{v}\""]),
    ClauseRule::new(Field::Cidr, &["ip=\"{v}\""]),
    ClauseRule::new(Field::Port, &["port={v}"]),
    ClauseRule::new(Field::Domain, &["domain=\"{v}\""]),
    ClauseRule::new(Field::Banner, &["banner=\"{v}\""]),
    ClauseRule::new(Field::HttpPath, &["body=\"{v}\""]),
    ClauseRule::new(Field::TlsCn, &["cert.subject.cn=\"{v}\""]),
    ClauseRule::new(Field::TlsSan, &["cert=\"{v}\""]),
    ClauseRule::new(Field::TlsIssuer, &["cert.issuer=\"{v}\""]),
    ClauseRule::new(Field::TlsSubject, &["cert.subject=\"{v}\""]),
    ClauseRule::new(Field::Asn, &["asn={v}"]).kind(ValueKind::Asn),
    ClauseRule::new(Field::Org, &["org=\"{v}\""]),
    ClauseRule::new(Field::Protocol, &["protocol=\"{v}\""]),
    COUNTRY,
    ClauseRule::new(Field::Product, &["product=\"{v}\""]),
    ClauseRule::new(Field::Title, &["title=\"{v}\""]),
    ClauseRule::new(Field::Version, &["banner=\"{v}\""]),
    ClauseRule::new(Field::ExpiredCert, &["cert.is_valid=false"]).kind(ValueKind::Flag),
    ClauseRule::new(Field::HttpTitle, &["title=\"{v}\""]),
    ClauseRule::new(Field::HttpStatus, &["status_code=\"{v}\""]),
    ClauseRule::new(Field::ServerHeader, &["server=\"{v}\""]),
    ClauseRule::new(Field::Os, &["os=\"{v}\""]),
    ClauseRule::new(Field::Ssl, &["cert=\"{v}\""]),
    ClauseRule::new(Field::Hostname, &["host=\"{v}\""]),
    ClauseRule::new(Field::City, &["city=\"{v}\""]),
];

/// Converter for FOFA queries.
#[derive(Debug, Clone, Copy, Default)]
pub struct FofaConverter;

impl FofaConverter {
    /// Country clause: `fofaCountry` wins over `country`, and the
    /// `ip_country` form pairs with `ip_ports`.
    fn country_rule(composite: bool, fields: &NormalizedFields) -> ClauseRule {
        let rule = if composite { IP_COUNTRY } else { COUNTRY };
        if fields.has(Field::FofaCountry) {
            rule.for_field(Field::FofaCountry)
        } else {
            rule
        }
    }
}

impl Converter for FofaConverter {
    fn descriptor(&self) -> EngineDescriptor {
        DESCRIPTOR
    }

    fn convert(&self, fields: &NormalizedFields) -> Result<ConversionResult> {
        let has_country = fields.has(Field::Country) || fields.has(Field::FofaCountry);
        let composite = has_country && fields.values(Field::Port).len() > 1;
        let has_port = fields.has(Field::Port);
        let has_vuln = fields.has(Field::Vuln);

        let mut clauses = Vec::new();
        for rule in RULES {
            let clause = match rule.field {
                Field::Port if composite => build_clause(&DIALECT, &IP_PORTS, fields)?,
                Field::Country => {
                    build_clause(&DIALECT, &Self::country_rule(composite, fields), fields)?
                }
                // FOFA cannot scope a title to a port; the port wins.
                Field::Title if has_port => None,
                _ => build_clause(&DIALECT, rule, fields)?,
            };
            clauses.extend(clause);
        }

        if has_vuln && clauses.is_empty() {
            return Ok(ConversionResult {
                query: VULN_ONLY_QUERY.to_string(),
                notes: vec![VULN_UNSUPPORTED_NOTE.to_string()],
                fallback: None,
            });
        }

        let mut result = assemble(&DIALECT, &clauses);
        if has_vuln {
            result.note(VULN_OMITTED_NOTE);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(fields: &NormalizedFields) -> ConversionResult {
        FofaConverter.convert(fields).unwrap()
    }

    #[test]
    fn test_empty_fields() {
        assert_eq!(convert(&NormalizedFields::new()).query, "*");
    }

    #[test]
    fn test_single_fields() {
        let cases = [
            (Field::Ip, "8.8.8.8", "ip=\"8.8.8.8\""),
            (Field::Cidr, "10.0.0.0/8", "ip=\"10.0.0.0/8\""),
            (Field::Port, "22", "port=22"),
            (Field::Domain, "example.com", "domain=\"example.com\""),
            (Field::Org, "Acme", "org=\"Acme\""),
            (Field::Country, "CN", "country=\"CN\""),
            (Field::Title, "Login", "title=\"Login\""),
        ];
        for (field, value, expected) in cases {
            let result = convert(&NormalizedFields::new().with(field, value));
            assert_eq!(result.query, expected, "field {field}");
        }
    }

    #[test]
    fn test_ports_or_group() {
        let result = convert(&NormalizedFields::new().with(Field::Port, vec![80, 443]));
        assert_eq!(result.query, "(port=80 || port=443)");
    }

    #[test]
    fn test_asn_numeric() {
        let result = convert(&NormalizedFields::new().with(Field::Asn, "AS13335"));
        assert_eq!(result.query, "asn=13335");
    }

    #[test]
    fn test_expired_cert() {
        let result = convert(&NormalizedFields::new().with(Field::ExpiredCert, true));
        assert_eq!(result.query, "cert.is_valid=false");
    }

    #[test]
    fn test_port_drops_title() {
        let fields = NormalizedFields::new()
            .with(Field::Port, 8080)
            .with(Field::Title, "Jenkins");
        let result = convert(&fields);
        assert_eq!(result.query, "port=8080");
        assert!(result.notes.is_empty());
    }

    #[test]
    fn test_multi_port_with_country_uses_ip_ports() {
        let fields = NormalizedFields::new()
            .with(Field::Port, vec![80, 443])
            .with(Field::Country, "CN");
        let result = convert(&fields);
        assert_eq!(result.query, "ip_ports=\"80,443\" && ip_country=\"CN\"");
        assert_eq!(result.notes, vec!["Multiple filters combined with && logic"]);
    }

    #[test]
    fn test_single_port_with_country_stays_plain() {
        let fields = NormalizedFields::new()
            .with(Field::Port, 443)
            .with(Field::Country, "CN");
        assert_eq!(convert(&fields).query, "port=443 && country=\"CN\"");
    }

    #[test]
    fn test_fofa_country_takes_priority() {
        let fields = NormalizedFields::new()
            .with(Field::Country, "US")
            .with(Field::FofaCountry, "CN");
        assert_eq!(convert(&fields).query, "country=\"CN\"");

        let composite = NormalizedFields::new()
            .with(Field::Port, vec![21, 22])
            .with(Field::FofaCountry, "JP");
        assert_eq!(
            convert(&composite).query,
            "ip_ports=\"21,22\" && ip_country=\"JP\""
        );
    }

    #[test]
    fn test_country_full_ignored() {
        let fields = NormalizedFields::new().with(Field::CountryFull, "Germany");
        assert_eq!(convert(&fields).query, "*");
    }

    #[test]
    fn test_vuln_only_returns_advisory() {
        let result = convert(&NormalizedFields::new().with(Field::Vuln, "CVE-2021-1234"));
        assert_eq!(result.query, VULN_ONLY_QUERY);
        assert_eq!(result.notes, vec![VULN_UNSUPPORTED_NOTE]);
        assert!(result.fallback.is_none());
    }

    #[test]
    fn test_vuln_omitted_from_longer_query() {
        let fields = NormalizedFields::new()
            .with(Field::Vuln, "CVE-2021-1234")
            .with(Field::Product, "Apache");
        let result = convert(&fields);
        assert_eq!(result.query, "product=\"Apache\"");
        assert_eq!(result.notes, vec![VULN_OMITTED_NOTE]);
    }

    #[test]
    fn test_fallback() {
        let fields = NormalizedFields::new()
            .with(Field::Ip, "1.2.3.4")
            .with(Field::Domain, "example.com")
            .with(Field::Org, "Acme")
            .with(Field::Product, "nginx")
            .with(Field::Os, "Linux")
            .with(Field::City, "Paris");
        let result = convert(&fields);
        assert_eq!(
            result.fallback.as_deref(),
            Some("ip=\"1.2.3.4\" && domain=\"example.com\" && org=\"Acme\"")
        );
    }

    #[test]
    fn test_every_supported_field_has_rule() {
        let skipped = [Field::Vuln, Field::CountryFull, Field::FofaCountry];
        for field in Field::ALL.into_iter().filter(|f| !skipped.contains(f)) {
            assert!(RULES.iter().any(|r| r.field == field), "missing {field}");
        }
    }
}
