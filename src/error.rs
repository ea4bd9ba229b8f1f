use actix_web::http::header::InvalidHeaderValue;
use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SecureHeadersError {
    #[error("{policy} received an invalid directive name {name:?}")]
    InvalidDirectiveName { policy: &'static str, name: String },

    #[error("{policy} received a duplicate directive {name:?}")]
    DuplicateDirective { policy: &'static str, name: String },

    #[error("Content-Security-Policy received an invalid directive value for {directive:?}: {value}")]
    InvalidDirectiveValue { directive: String, value: String },

    #[error("Content-Security-Policy received an invalid directive value for {directive:?}. {value:?} should be quoted")]
    UnquotedDirectiveValue { directive: String, value: String },

    #[error(
        "Content-Security-Policy needs a default-src but it was set to `null`. \
         If you really want to disable it, set it to `DirectiveValue::DangerouslyDisableDefaultSrc`"
    )]
    NullDefaultSrc,

    #[error("Content-Security-Policy: tried to disable {0:?} as if it were default-src; simply omit the key")]
    MisplacedDisableDefaultSrc(String),

    #[error(
        "Content-Security-Policy needs a default-src but none was provided. \
         If you really want to disable it, set it to `DirectiveValue::DangerouslyDisableDefaultSrc`"
    )]
    MissingDefaultSrc,

    #[error("{0} has no directives. Either set some or disable the header")]
    NoDirectives(&'static str),

    #[error("Permissions-Policy received an invalid directive value for {directive:?}. {value} should be a boolean or an array of strings.")]
    InvalidPermissionValue { directive: String, value: String },

    #[error("{header} does not support the {value:?} value")]
    UnsupportedValue { header: &'static str, value: String },

    #[error("Strict-Transport-Security: {0} is not a valid value for maxAge. Please choose a positive integer.")]
    InvalidMaxAge(String),

    #[error("{header} received an unsupported property, `{found}`. Did you mean to pass `{expected}`?")]
    MisspelledOption {
        header: &'static str,
        found: &'static str,
        expected: &'static str,
    },

    #[error("Referrer-Policy received no policy tokens")]
    EmptyReferrerPolicy,

    #[error("Referrer-Policy received an unexpected policy token {0}")]
    UnexpectedReferrerToken(String),

    #[error("Referrer-Policy received a duplicate policy token {0:?}")]
    DuplicateReferrerToken(String),

    #[error("{header} option was specified twice. Remove the `{alias}` option to fix this error.")]
    DuplicateOption {
        header: &'static str,
        alias: &'static str,
    },

    #[error("`{0}` expects a boolean or an options object")]
    InvalidOption(String),

    #[error("Content-Security-Policy could not render {directive:?}: no request nonce was generated")]
    MissingNonce { directive: String },

    #[error("Unsupported hash algorithm {0:?}")]
    InvalidHashAlgorithm(String),

    #[error("Failed to generate nonce: {0}")]
    NonceGeneration(getrandom::Error),

    #[error("Header processing error: {0}")]
    HeaderError(#[from] InvalidHeaderValue),

    #[error("Config error: {0}")]
    ConfigError(#[from] serde_json::Error),
}

impl ResponseError for SecureHeadersError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
