use std::env;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // transport failures (including timeouts) surface like any other
        // backend failure: a user-visible notice, no retry
        if err.is_timeout() {
            return backend_error("request timed out");
        }

        backend_error("network error")
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn provider_load_error<T: Into<String>>(message: T) -> Error {
    Error {
        code: 2,
        message: message.into(),
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 3,
        message: "invalid state".into(),
    }
}

pub fn validation_error<T: Into<String>>(message: T) -> Error {
    Error {
        code: 100,
        message: message.into(),
    }
}

pub fn busy_error() -> Error {
    Error {
        code: 101,
        message: "a request is already in flight".into(),
    }
}

pub fn not_found_error<T: Into<String>>(message: T) -> Error {
    Error {
        code: 102,
        message: message.into(),
    }
}

pub fn permission_denied_error() -> Error {
    Error {
        code: 103,
        message: "permission denied".into(),
    }
}

pub fn unavailable_error<T: Into<String>>(message: T) -> Error {
    Error {
        code: 104,
        message: message.into(),
    }
}

pub fn backend_error<T: Into<String>>(message: T) -> Error {
    Error {
        code: 105,
        message: message.into(),
    }
}

pub fn empty_route_error() -> Error {
    Error {
        code: 106,
        message: "empty route".into(),
    }
}

pub fn generation_failed_error() -> Error {
    Error {
        code: 107,
        message: "failed to generate share code".into(),
    }
}
