//! Shared helpers for live integration tests

#![allow(dead_code)]

use std::env;
use std::sync::Arc;

use cosmic_settings_api::{HttpInvoker, ManagementClient};

/// Return early from a live test unless every listed variable is set.
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        if let Some(missing) = [$($var),+].into_iter().find(|v| std::env::var(v).is_err()) {
            eprintln!("skipping: {missing} not set");
            return;
        }
    };
}

/// Unwrap a `Some`, failing the test with `msg` on `None`.
#[macro_export]
macro_rules! require_some {
    ($expr:expr $(, $($msg:tt)+)?) => {
        match $expr {
            Some(value) => value,
            None => panic!("{}", concat!("missing value" $(, ": ", $($msg)+)?)),
        }
    };
}

/// Unwrap an `Ok`, failing the test with the error (and `msg`) otherwise.
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(, $($msg:tt)+)?) => {
        match $expr {
            Ok(value) => value,
            Err(err) => panic!("{}: {err:?}", concat!("call failed" $(, ": ", $($msg)+)?)),
        }
    };
}

/// Client built from `COSMIC_ENDPOINT` and `COSMIC_SESSION_KEY`.
pub struct TestContext {
    pub client: ManagementClient,
}

impl TestContext {
    pub fn from_env() -> Option<Self> {
        let endpoint = env::var("COSMIC_ENDPOINT").ok()?;
        let session_key = env::var("COSMIC_SESSION_KEY").unwrap_or_default();

        let invoker = HttpInvoker::builder(endpoint)
            .session_key(session_key)
            .build()
            .ok()?;

        Some(Self {
            client: ManagementClient::new(Arc::new(invoker)),
        })
    }
}
