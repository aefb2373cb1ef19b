use serde::{Deserialize, Serialize};

use crate::services::QueryError;

/// Whether the current browsing session is authenticated.
///
/// Derived per transition from the authentication query; never cached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthStatus {
    Authenticated,
    Unauthenticated,
}

impl AuthStatus {
    /// Any query failure counts as unauthenticated.
    pub fn from_query(result: &Result<(), QueryError>) -> Self {
        match result {
            Ok(()) => AuthStatus::Authenticated,
            Err(_) => AuthStatus::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthStatus::Authenticated)
    }
}

/// Whether the user has agreed to the usage terms.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    Agreed,
    NotAgreed,
    /// The agreement query failed.
    Unknown,
}

impl AgreementStatus {
    pub fn from_query(result: &Result<bool, QueryError>) -> Self {
        match result {
            Ok(true) => AgreementStatus::Agreed,
            Ok(false) => AgreementStatus::NotAgreed,
            Err(_) => AgreementStatus::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_failure_maps_to_unauthenticated() {
        assert_eq!(AuthStatus::from_query(&Ok(())), AuthStatus::Authenticated);
        assert_eq!(
            AuthStatus::from_query(&Err(QueryError::Status(401))),
            AuthStatus::Unauthenticated
        );
        assert_eq!(
            AuthStatus::from_query(&Err(QueryError::network("connection refused"))),
            AuthStatus::Unauthenticated
        );
    }

    #[test]
    fn agreement_maps_allowed_flag_and_failures() {
        assert_eq!(AgreementStatus::from_query(&Ok(true)), AgreementStatus::Agreed);
        assert_eq!(AgreementStatus::from_query(&Ok(false)), AgreementStatus::NotAgreed);
        assert_eq!(
            AgreementStatus::from_query(&Err(QueryError::decode("missing field `allowed`"))),
            AgreementStatus::Unknown
        );
    }
}
