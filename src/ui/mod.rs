//! Terminal rendering of validation reports.

mod colors;
mod report_view;

pub use colors::Theme;
pub use report_view::ReportRenderer;

/// Whether colored output should be used.
///
/// Colors are off when `--no-color` was passed or `NO_COLOR` is set.
pub fn colors_enabled(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}
