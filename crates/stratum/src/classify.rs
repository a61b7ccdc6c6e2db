//! Tier classification.
//!
//! A component's tier is decided by an ordered list of [`Rule`]s evaluated
//! against its lower-cased label. The first matching rule wins; a component
//! that matches nothing is a [`Tier::Service`].
//!
//! Explicit tier tags such as `[tier:database]` come first so they always
//! override the keyword heuristics. The keyword rules carry exclusions: a
//! label that mentions a user but also a service, api or store is not placed
//! in the user row.
//!
//! # Example
//!
//! ```
//! # use stratum::classify::classify_label;
//! # use stratum_core::tier::Tier;
//! assert_eq!(classify_label("Website User"), Tier::User);
//! assert_eq!(classify_label("user-service"), Tier::Service);
//! assert_eq!(classify_label("Orders DB [tier:messagebus]"), Tier::MessageBus);
//! ```

use std::collections::BTreeMap;

use log::trace;

use stratum_core::tier::Tier;

use crate::component::Component;

/// How a rule tests a lower-cased label.
#[derive(Debug, Clone, Copy)]
enum Matcher {
    /// The tier's bracketed tag appears in the label.
    Tag(Tier),
    /// Any of `any` appears and none of `unless` does.
    Keywords {
        any: &'static [&'static str],
        unless: &'static [&'static str],
    },
}

/// One entry of the classification rule list.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    name: &'static str,
    tier: Tier,
    matcher: Matcher,
}

impl Rule {
    const fn tag(name: &'static str, tier: Tier) -> Self {
        Self {
            name,
            tier,
            matcher: Matcher::Tag(tier),
        }
    }

    const fn keywords(
        name: &'static str,
        tier: Tier,
        any: &'static [&'static str],
        unless: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            tier,
            matcher: Matcher::Keywords { any, unless },
        }
    }

    /// Short name of the rule, used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The tier assigned when this rule matches.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Tests an already lower-cased label.
    pub fn matches(&self, label: &str) -> bool {
        match self.matcher {
            Matcher::Tag(tier) => label.contains(tier.tag()),
            Matcher::Keywords { any, unless } => {
                any.iter().any(|word| label.contains(word))
                    && !unless.iter().any(|word| label.contains(word))
            }
        }
    }
}

/// The classification rules in priority order.
pub const RULES: [Rule; 12] = [
    Rule::tag("user tag", Tier::User),
    Rule::tag("frontend tag", Tier::Frontend),
    Rule::tag("gateway tag", Tier::Gateway),
    Rule::tag("service tag", Tier::Service),
    Rule::tag("messagebus tag", Tier::MessageBus),
    Rule::tag("database tag", Tier::Database),
    Rule::keywords(
        "user keyword",
        Tier::User,
        &["user"],
        &["service", "api", "db", "store"],
    ),
    Rule::keywords(
        "actor keywords",
        Tier::User,
        &["actor", "customer", "admin", "client", "human", "person"],
        &["web-client"],
    ),
    Rule::keywords("web client", Tier::Frontend, &["web-client"], &[]),
    Rule::keywords("gateway keyword", Tier::Gateway, &["gateway"], &[]),
    Rule::keywords(
        "messaging keywords",
        Tier::MessageBus,
        &["kafka", "queue", "bus"],
        &[],
    ),
    Rule::keywords(
        "storage keywords",
        Tier::Database,
        &["db", "store", "cache", "redis", "sql"],
        &[],
    ),
];

/// Returns the first rule matching `label`, if any.
pub fn matching_rule(label: &str) -> Option<&'static Rule> {
    let label = label.to_lowercase();
    RULES.iter().find(|rule| rule.matches(&label))
}

/// Assigns a tier to a label.
pub fn classify_label(label: &str) -> Tier {
    matching_rule(label).map_or(Tier::Service, Rule::tier)
}

/// Buckets components by tier, preserving input order within each bucket.
///
/// Tiers with no components are absent from the map.
pub fn classify(components: impl IntoIterator<Item = Component>) -> BTreeMap<Tier, Vec<Component>> {
    let mut tiers: BTreeMap<Tier, Vec<Component>> = BTreeMap::new();

    for component in components {
        let rule = matching_rule(component.label());
        let tier = rule.map_or(Tier::Service, Rule::tier);
        trace!(
            id = component.id(),
            tier:% = tier,
            rule = rule.map_or("default", Rule::name);
            "Classified component"
        );
        tiers.entry(tier).or_default().push(component);
    }

    tiers
}
