//! Educational features: explanations of how a conversion was built.

use colored::Colorize;
use crossdork::clause::{normalize_asn, FALLBACK_CLAUSES, FALLBACK_THRESHOLD};
use crossdork::{ConversionResult, Field, NormalizedFields, Registry};
use std::collections::BTreeMap;

/// Command explanation builder.
#[derive(Debug, Clone, Default)]
pub struct Explain {
    description: String,
    what_happens: Vec<String>,
    learn_more: Vec<(String, String)>,
}

impl Explain {
    fn description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    fn step(&mut self, step: impl Into<String>) {
        self.what_happens.push(step.into());
    }

    fn docs(&mut self, name: &str, url: &str) {
        self.learn_more.push((name.to_string(), url.to_string()));
    }

    /// The explanation steps, in print order.
    pub fn steps(&self) -> &[String] {
        &self.what_happens
    }

    /// Print the explanation to stdout.
    pub fn print(&self) {
        println!();
        println!("{}", "=== What This Does ===".bold().cyan());
        println!("{}", self.description);
        println!();

        if !self.what_happens.is_empty() {
            println!("{}", "How it works:".bold());
            for (i, step) in self.what_happens.iter().enumerate() {
                println!("  {}. {}", i + 1, step);
            }
            println!();
        }

        if !self.learn_more.is_empty() {
            println!("{}", "Learn more:".bold());
            for (name, url) in &self.learn_more {
                println!("  {:<8} {}", name, url.cyan().underline());
            }
        }

        println!();
        println!("{}", "=== Results ===".bold().cyan());
        println!();
    }

    /// Explain the engine-specific rules that shaped a conversion.
    pub fn convert(
        fields: &NormalizedFields,
        registry: &Registry,
        results: &BTreeMap<String, ConversionResult>,
    ) -> Self {
        let mut explain = Self::default().description(
            "Translates one set of search fields into each engine's query language. \
             Each field becomes one filter; filters are AND-ed together.",
        );

        let present = fields.present();
        if present.is_empty() {
            explain.step("No usable fields, so every engine gets the match-all query '*'");
        } else {
            let names: Vec<&str> = present.iter().map(|f| f.name()).collect();
            explain.step(format!("Fields used: {}", names.join(", ")));
        }

        let unknown: Vec<&str> = fields
            .iter()
            .map(|(k, _)| k)
            .filter(|k| Field::from_name(k).is_none())
            .collect();
        if !unknown.is_empty() {
            explain.step(format!("Ignored unknown keys: {}", unknown.join(", ")));
        }

        let ran = |id: &str| results.contains_key(id);
        let ports = fields.values(Field::Port);

        for raw in fields.values(Field::Asn) {
            match normalize_asn(&raw) {
                Some(number) if number != raw => {
                    explain.step(format!("ASN '{raw}' is searched as {number}"));
                }
                Some(_) => {}
                None => explain.step(format!("ASN '{raw}' is not a number and was skipped")),
            }
        }

        if ports.len() > 1 {
            if ran("shodan") {
                explain.step("Shodan: several ports collapse into one comma list (port:80,443)");
            }
            if ran("censys") {
                explain.step("Censys: several ports become a set (host.services.port:{\"80\", \"443\"})");
            }
        }

        if fields.has(Field::ExpiredCert) && ran("censys") {
            explain.step("Censys: expiredCert compares the certificate end date against \"now\"");
        }

        if ran("censys") {
            if fields.has(Field::Port) && fields.has(Field::Title) {
                explain.step(
                    "Censys: port and title are matched on the same service, or on any web property with that title",
                );
            }
            if fields.has(Field::CountryFull) && fields.has(Field::Country) {
                explain.step("Censys: countryFull replaces the country code filter");
            }
            if fields.has(Field::Protocol) {
                explain.step("Censys: protocol names are upper-cased (http becomes HTTP)");
            }
        }

        if ran("fofa") {
            let has_country = fields.has(Field::Country) || fields.has(Field::FofaCountry);
            if fields.has(Field::FofaCountry) {
                explain.step("FOFA: fofaCountry is used instead of country");
            }
            if has_country && ports.len() > 1 {
                explain.step(
                    "FOFA: several ports with a country use ip_ports and ip_country so both apply to the same IP",
                );
            }
            if fields.has(Field::Port) && fields.has(Field::Title) {
                explain.step("FOFA: cannot combine port and title, so the title filter was dropped");
            }
            if fields.has(Field::Vuln) {
                explain.step("FOFA: has no CVE filter, so vuln is not part of the query");
            }
        }

        if results.values().any(ConversionResult::has_fallback) {
            explain.step(format!(
                "More than {FALLBACK_THRESHOLD} filters: a fallback with the first {FALLBACK_CLAUSES} is offered in case the full query is too strict",
            ));
        }

        for id in results.keys() {
            if let Some(converter) = registry.get(id) {
                let descriptor = converter.descriptor();
                explain.docs(descriptor.name, descriptor.docs_url);
            }
        }

        explain
    }
}
