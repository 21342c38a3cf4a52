//! Text rendering shared by `Blade` and `Multivector`.

use std::fmt::Write;

use crate::basis::BasisLabel;

/// Render nonzero terms as `|c|^label`, joined by `" + "`.
///
/// A negative coefficient replaces the separator before it with `"- "`
/// (or leads with `"- "` when it is the first term). All-zero input
/// renders as the empty string.
pub(crate) fn render_terms<'a>(terms: impl IntoIterator<Item = &'a (f64, BasisLabel)>) -> String {
    let mut out = String::new();
    for (coeff, label) in terms {
        if *coeff == 0.0 {
            continue;
        }
        if *coeff < 0.0 {
            out.push_str("- ");
        } else if !out.is_empty() {
            out.push_str(" + ");
        }
        // Writing into a String cannot fail.
        let _ = write!(out, "{}^{}", coeff.abs(), label);
    }
    out
}

/// `[1, 2.5, -3]`, the bracketed list used by the `repr` forms.
pub(crate) fn render_list(values: impl IntoIterator<Item = f64>) -> String {
    let items: Vec<String> = values.into_iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(", "))
}
