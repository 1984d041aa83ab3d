// src/license/mod.rs

//! License normalization against a persistent correction table

mod builtin;
mod map;
mod mapper;

pub use builtin::BUILTIN_LICENSES;
pub use map::{normalize_key, LicenseMap};
pub use mapper::{
    DefaultResolver, FailFast, LicenseMapper, PromptResolver, UnknownLicenseResolver,
};
