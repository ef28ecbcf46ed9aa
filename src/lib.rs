//! bylint - style-conformance checking for ghostwritten articles.
//!
//! A publication's editorial guide is parsed into a [`StyleProfile`] with
//! [`load_profile`]; a draft is then checked against it with [`validate`],
//! which returns every deviation as a finding in a [`ValidationReport`].
//!
//! ```
//! use bylint::{load_profile, validate, ArticleDraft};
//!
//! let guide = concat!(
//!     "# Forbes Style Guide\n\n",
//!     "| Element | Requirement |\n",
//!     "|---|---|\n",
//!     "| Word count | 800-900 words |\n\n",
//!     "## What to Avoid\n\n- Em dashes\n",
//! );
//! let profile = load_profile(guide)?;
//! let report = validate(&ArticleDraft::new("Headline", "Too short."), &profile);
//! assert_eq!(
//!     report.findings[0].to_string(),
//!     "word-count: below minimum (2 < 800)"
//! );
//! # Ok::<(), bylint::ParseError>(())
//! ```

pub mod config;
pub mod draft;
pub mod logging;
pub mod output;
pub mod profile;
pub mod sanitize;
pub mod ui;
pub mod validation;

pub use draft::ArticleDraft;
pub use profile::{load_profile, load_profile_json, ParseError, StyleProfile};
pub use validation::{validate, ArticleValidator, ValidationReport};
