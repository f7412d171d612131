//! Indented text rendering of a sitemap

use crate::state::Sitemap;
use std::fmt::{self, Write};

/// Indentation added per level below the first
const INDENT: &str = "   ";

/// Writes the sitemap as an indented tree
///
/// The first lines name the domain and the root path; every other page
/// follows on its own line in depth-first pre-order, indented by depth.
/// Pages that could not be fetched carry their failure in brackets.
pub fn write_sitemap<W: Write>(out: &mut W, sitemap: &Sitemap, domain: &str) -> fmt::Result {
    writeln!(out, "{} sitemap", domain)?;

    for (id, depth) in sitemap.iter() {
        let node = sitemap.node(id);
        if depth == 0 {
            write!(out, "{}", node.path())?;
        } else {
            write!(out, " {}{}", INDENT.repeat(depth - 1), node.path())?;
        }

        match node.error() {
            Some(error) => writeln!(out, "  [{}: {}]", node.state(), error)?,
            None => writeln!(out)?,
        }
    }

    Ok(())
}

/// Renders the sitemap into a string
///
/// # Example
///
/// ```
/// use sumi_sitemap::output::render_sitemap;
/// use sumi_sitemap::state::Sitemap;
///
/// let mut sitemap = Sitemap::new("/");
/// let root = sitemap.root();
/// sitemap.attach(root, "/about".to_string());
///
/// assert_eq!(render_sitemap(&sitemap, "example.com"), "example.com sitemap\n/\n /about\n");
/// ```
pub fn render_sitemap(sitemap: &Sitemap, domain: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_sitemap(&mut out, sitemap, domain);
    out
}
