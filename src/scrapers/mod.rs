//! Various modules for getting data from the site's HTML.

pub mod course_page;

use crate::error::*;
use scraper::Selector;
use std::collections::HashMap;

/// Named CSS selectors, parsed and ready to use.
pub type Selectors = HashMap<String, Selector>;

/// Parses a TOML table of `name = "css"` pairs, then layers `overrides` on
/// top of it before compiling every entry.
pub fn load_sels(toml_str: &str, overrides: &HashMap<String, String>) -> Result<Selectors> {
    let mut table: HashMap<String, String> = toml::from_str(toml_str)?;
    table.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));

    table.into_iter()
         .map(|(name, css)| -> Result<(String, Selector)> {
             let sel = sel(&name, &css)?;
             Ok((name, sel))
         })
         .collect()
}

fn sel(name: &str, css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| {
        ErrorKind::InvalidSelector(name.into(), css.into(), format!("{:?}", e)).into()
    })
}

/// Removes the selector called `name` from the table.
fn take_sel(sels: &mut Selectors, name: &str) -> Result<Selector> {
    match sels.remove(name) {
        Some(sel) => Ok(sel),
        None => bail!(ErrorKind::MissingSelector(name.into()))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use scraper::Html;

    #[test]
    fn overrides_win() {
        let mut overrides = HashMap::new();
        overrides.insert("b".to_string(), "span.y".to_string());

        let sels = load_sels("a = \"div.x\"\nb = \"p\"", &overrides).unwrap();

        let doc = Html::parse_fragment("<div class=\"x\"></div><span class=\"y\"></span><p></p>");

        assert_eq!(sels.len(), 2);
        assert_eq!(doc.select(&sels["a"]).count(), 1);
        assert_eq!(doc.select(&sels["b"]).count(), 1);
        assert_eq!(doc.select(&sels["b"]).next().unwrap().value().name(), "span");
    }

    #[test]
    fn invalid_selector() {
        let err = load_sels("broken = \"div[[\"", &HashMap::new()).unwrap_err();

        match err.kind() {
            ErrorKind::InvalidSelector(name, css, _) => {
                assert_eq!(name, "broken");
                assert_eq!(css, "div[[");
            }
            other => panic!("unexpected error: {}", other)
        }
    }

    #[test]
    fn missing_selector() {
        let mut sels = load_sels("a = \"div\"", &HashMap::new()).unwrap();

        assert!(take_sel(&mut sels, "a").is_ok());
        assert!(take_sel(&mut sels, "a").is_err());
    }
}
