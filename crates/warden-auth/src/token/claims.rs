//! Claim set assembly for access tokens.

use serde_json::{Map, Value};

use warden_core::identity::{Claim, Identity};

/// Claim type for the subject (identity id).
pub const SUBJECT: &str = "sub";
/// Claim type for the login name.
pub const UNIQUE_NAME: &str = "unique_name";
/// Claim type for the email address.
pub const EMAIL: &str = "email";
/// Claim type for the display name.
pub const FULL_NAME: &str = "fullName";
/// Claim type for a role membership.
pub const ROLE: &str = "role";

/// Ordered claims embedded in a single access token.
///
/// Built fresh for every issuance and never shared between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimSet {
    claims: Vec<Claim>,
}

impl ClaimSet {
    /// Assembles the claim set for `identity`.
    ///
    /// Order: subject, username, email (if non-empty), full name (if
    /// non-empty), every custom claim as given, then one role claim per
    /// role as given.
    pub fn assemble(identity: &Identity, roles: &[String], custom: &[Claim]) -> Self {
        let mut claims = Vec::with_capacity(4 + custom.len() + roles.len());

        claims.push(Claim::new(SUBJECT, identity.id.as_str()));
        claims.push(Claim::new(UNIQUE_NAME, identity.username.as_str()));

        if let Some(email) = identity.email() {
            claims.push(Claim::new(EMAIL, email));
        }
        if let Some(full_name) = identity.full_name() {
            claims.push(Claim::new(FULL_NAME, full_name));
        }

        claims.extend(custom.iter().cloned());
        claims.extend(roles.iter().map(|role| Claim::new(ROLE, role.as_str())));

        Self { claims }
    }

    /// All claims in order.
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// The subject claim value.
    pub fn subject(&self) -> Option<&str> {
        self.first(SUBJECT)
    }

    /// First value recorded for `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Every value recorded for `name`, in order.
    pub fn values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.claims
            .iter()
            .filter(move |c| c.name == name)
            .map(|c| c.value.as_str())
    }

    /// Role names carried by this set, in order.
    pub fn roles(&self) -> Vec<&str> {
        self.values(ROLE).collect()
    }

    /// Number of claims.
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Returns `true` if the set holds no claims.
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Renders the claims as a JSON object.
    ///
    /// A claim type that occurs once maps to a string; one that occurs
    /// several times (typically `role`) maps to an array preserving order.
    pub fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for claim in &self.claims {
            let value = Value::String(claim.value.clone());
            match map.get_mut(&claim.name) {
                None => {
                    map.insert(claim.name.clone(), value);
                }
                Some(Value::Array(values)) => values.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
            }
        }
        map
    }
}
