use crate::monitor::{Event, Observer};
use indexmap::IndexMap;
use regex::{Captures, Regex};
use std::fmt::Display;

lazy_static::lazy_static! {
    // shortest run up to the next `}}`, so `{{a}}{{b}}` yields two placeholders
    static ref PLACEHOLDER_REGEX: Regex =
        Regex::new(r"\{\{(.*?)\}\}").expect("a valid regex pattern");
}

/// Replaces every `{{key}}` in `template` with the matching value from `data`.
///
/// Keys are matched verbatim (no trimming). A key that `data` does not hold is left in the
/// output exactly as written, and the observer receives one warning per occurrence.
///
/// ```
/// use indexmap::IndexMap;
/// use trellis::{monitor::NullObserver, template::populate_template};
///
/// let data = IndexMap::from([("name".to_string(), "World")]);
/// let rendered = populate_template("Hello {{name}}!", &data, &NullObserver);
///
/// assert_eq!(rendered, "Hello World!");
/// ```
pub fn populate_template<V: Display>(
    template: &str,
    data: &IndexMap<String, V>,
    observer: &dyn Observer,
) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];

            match data.get(key) {
                Some(value) => value.to_string(),
                None => {
                    observer.notify(
                        &Event::warn("missing template data for placeholder").with_data(key),
                    );
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}
