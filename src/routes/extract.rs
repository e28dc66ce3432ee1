use std::{collections::HashMap, convert::Infallible};

use axum::{
    extract::{FromRequestParts, RawPathParams},
    http::request::Parts,
};

/// Every path parameter of the matched route, percent-decoded. Identifier
/// validation belongs to the pipeline, so this extractor never rejects.
pub struct PathValues(pub HashMap<String, String>);

impl<S: Send + Sync> FromRequestParts<S> for PathValues {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let values = match RawPathParams::from_request_parts(parts, state).await {
            Ok(params) => params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            Err(_) => HashMap::new(),
        };
        Ok(Self(values))
    }
}
