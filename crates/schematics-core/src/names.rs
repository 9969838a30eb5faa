//! Name variants used when rendering templates

/// The different spellings of a library name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// kebab-case, used for file names (`my-lib`)
    pub file_name: String,
    /// PascalCase, used for types (`MyLib`)
    pub class_name: String,
    /// camelCase, used for functions and properties (`myLib`)
    pub property_name: String,
    /// SCREAMING_SNAKE_CASE (`MY_LIB`)
    pub constant_name: String,
}

/// Split a name into lowercase words on separators and camelCase humps
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in name.chars() {
        if matches!(c, '-' | '_' | ' ' | '/' | '.') {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_lowercase() || c.is_ascii_digit();
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Compute every name variant for `name`
pub fn names(name: &str) -> Names {
    let words = words(name);

    let class_name: String = words.iter().map(|w| capitalize(w)).collect();
    let property_name = match words.split_first() {
        Some((first, rest)) => {
            let mut s = first.clone();
            s.extend(rest.iter().map(|w| capitalize(w)));
            s
        }
        None => String::new(),
    };

    Names {
        file_name: words.join("-"),
        class_name,
        property_name,
        constant_name: words
            .iter()
            .map(|w| w.to_uppercase())
            .collect::<Vec<_>>()
            .join("_"),
    }
}
