// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! The error type for the binary

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub(crate) enum KkrError {
    #[error(transparent)]
    #[diagnostic(code(kkr_bands::io_error))]
    IoError(#[from] crate::error::IOError),
    #[error(transparent)]
    #[diagnostic(code(kkr_bands::config_error))]
    ConfigError(#[from] config::ConfigError),
    #[error(transparent)]
    Build(#[from] crate::error::BuildError),
    #[error("failed to install the log bridge: {0}")]
    #[diagnostic(code(kkr_bands::logger))]
    Logger(#[from] log::SetLoggerError),
    #[error("failed to install the tracing subscriber: {0}")]
    #[diagnostic(code(kkr_bands::subscriber))]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}
