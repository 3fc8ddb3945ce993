//! Inbound role signal.
//!
//! The wizard reads the role once at startup and writes it back on every
//! explicit role change, so a session can be shared or bookmarked.

use std::sync::{Mutex, PoisonError};

use url::form_urlencoded;

use crate::models::Role;

const ROLE_KEY: &str = "role";

/// Source and sink of the `role` parameter.
pub trait RoleSignal: Send + Sync {
    /// Raw value of the role parameter, if present.
    fn read(&self) -> Option<String>;

    /// Replaces the role parameter with `role`.
    fn write(&self, role: Role);
}

/// Role signal stored in a URL query string such as `step=2&role=ops`.
#[derive(Debug, Default)]
pub struct QueryRoleSignal {
    query: Mutex<String>,
}

impl QueryRoleSignal {
    /// Wraps a query string. A leading `?` is ignored.
    pub fn new(query: &str) -> Self {
        Self {
            query: Mutex::new(query.trim_start_matches('?').to_string()),
        }
    }

    /// Signal carrying just `role=<value>`, or nothing.
    pub fn from_role_param(value: Option<&str>) -> Self {
        match value {
            Some(value) => Self::new(
                &form_urlencoded::Serializer::new(String::new())
                    .append_pair(ROLE_KEY, value)
                    .finish(),
            ),
            None => Self::default(),
        }
    }

    /// Current query string, without the leading `?`.
    pub fn query(&self) -> String {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RoleSignal for QueryRoleSignal {
    /// Percent-decoded value of the first `role` parameter.
    fn read(&self) -> Option<String> {
        let query = self.query();
        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == ROLE_KEY)
            .map(|(_, value)| value.into_owned())
    }

    fn write(&self, role: Role) {
        let mut query = self.query.lock().unwrap_or_else(PoisonError::into_inner);
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key != ROLE_KEY {
                serializer.append_pair(&key, &value);
            }
        }
        *query = serializer.append_pair(ROLE_KEY, role.as_str()).finish();
    }
}
