//! Utility-class string building for the web front end.
//!
//! Tokens are joined in order and a later token replaces any earlier token
//! from the same utility group, so `cn(&["p-2", "p-4"])` is `"p-4"`. Variant
//! prefixes (`hover:`, `md:`) are part of the group, so `p-2 md:p-4` keeps
//! both.

/// Ordered collection of class tokens.
#[derive(Debug, Clone, Default)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append every whitespace-separated token in `classes`.
    pub fn add(mut self, classes: &str) -> Self {
        self.tokens
            .extend(classes.split_whitespace().map(str::to_string));
        self
    }

    pub fn add_if(self, condition: bool, classes: &str) -> Self {
        if condition {
            self.add(classes)
        } else {
            self
        }
    }

    pub fn extend<'a>(self, classes: impl IntoIterator<Item = &'a str>) -> Self {
        classes.into_iter().fold(self, |list, c| list.add(c))
    }

    /// Resolve conflicts and join into a single class attribute value.
    pub fn merge(&self) -> String {
        let keys: Vec<String> = self.tokens.iter().map(|t| conflict_key(t)).collect();
        let mut kept = Vec::with_capacity(self.tokens.len());
        for (i, token) in self.tokens.iter().enumerate() {
            let overridden = keys[i + 1..].iter().any(|later| *later == keys[i]);
            if !overridden {
                kept.push(token.as_str());
            }
        }
        kept.join(" ")
    }
}

/// Join and merge a fixed list of class strings.
pub fn cn(classes: &[&str]) -> String {
    ClassList::new().extend(classes.iter().copied()).merge()
}

const DISPLAY: &[&str] = &[
    "block",
    "inline-block",
    "inline",
    "flex",
    "inline-flex",
    "grid",
    "inline-grid",
    "contents",
    "hidden",
];

const POSITION: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];

const TEXT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];

const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];

const FONT_WEIGHTS: &[&str] = &[
    "thin",
    "extralight",
    "light",
    "normal",
    "medium",
    "semibold",
    "bold",
    "extrabold",
    "black",
];

const BG_SIZES: &[&str] = &["auto", "cover", "contain"];

const BG_POSITIONS: &[&str] = &[
    "bottom",
    "center",
    "left",
    "left-bottom",
    "left-top",
    "right",
    "right-bottom",
    "right-top",
    "top",
];

const BG_ATTACHMENTS: &[&str] = &["fixed", "local", "scroll"];

const ROUNDED_SIDES: &[&str] = &[
    "t", "r", "b", "l", "s", "e", "tl", "tr", "br", "bl", "ss", "se", "es", "ee",
];

const LENGTH_UNITS: &[&str] = &[
    "px", "rem", "em", "%", "vh", "vw", "dvh", "svh", "lvh", "vmin", "vmax", "ch", "ex", "lh",
    "rlh", "pt", "pc", "in", "cm", "mm",
];

/// Utility prefixes whose value follows a dash. Longest first so `px` wins
/// over `p`.
const PREFIXES: &[&str] = &[
    "min-w", "min-h", "max-w", "max-h", "inset", "gap-x", "gap-y", "px", "py", "pt", "pr", "pb",
    "pl", "mx", "my", "mt", "mr", "mb", "ml", "opacity", "gap", "top", "left", "right", "bottom",
    "z", "w", "h", "p", "m",
];

/// The variant prefix plus utility group of a token. Unknown tokens are
/// their own group, so only exact repeats collapse.
fn conflict_key(token: &str) -> String {
    // Colons inside an arbitrary value (`bg-[url(http://..)]`) are not variants.
    let head = &token[..token.find('[').unwrap_or(token.len())];
    let (variants, utility) = match head.rfind(':') {
        Some(i) => (&token[..=i], &token[i + 1..]),
        None => ("", token),
    };
    let utility = utility.strip_prefix('!').unwrap_or(utility);
    let utility = utility.strip_prefix('-').unwrap_or(utility);
    format!("{}{}", variants, utility_group(utility))
}

/// Inner text of an arbitrary value such as `[14px]`.
fn arbitrary(value: &str) -> Option<&str> {
    value.strip_prefix('[')?.strip_suffix(']')
}

/// Whether an arbitrary value is a size rather than a colour or image.
fn is_length(value: &str) -> bool {
    if value.starts_with("length:") || value == "0" {
        return true;
    }
    if ["calc(", "clamp(", "min(", "max("]
        .iter()
        .any(|f| value.starts_with(f))
    {
        return true;
    }
    let digits = value
        .bytes()
        .take_while(|b| b.is_ascii_digit() || *b == b'.')
        .count();
    digits > 0 && LENGTH_UNITS.contains(&&value[digits..])
}

fn text_group(value: &str) -> &'static str {
    // `text-sm/6` carries a line height after the slash.
    let size = value.split('/').next().unwrap_or(value);
    if TEXT_SIZES.contains(&size) {
        "text-size"
    } else if TEXT_ALIGN.contains(&value) {
        "text-align"
    } else if value.starts_with("opacity-") {
        "text-opacity"
    } else if arbitrary(value).is_some_and(is_length) {
        "text-size"
    } else {
        "text-color"
    }
}

fn bg_group(value: &str) -> &'static str {
    if value.starts_with("opacity-") {
        "bg-opacity"
    } else if BG_SIZES.contains(&value) {
        "bg-size"
    } else if BG_POSITIONS.contains(&value) {
        "bg-position"
    } else if BG_ATTACHMENTS.contains(&value) {
        "bg-attachment"
    } else if value.starts_with("repeat") || value == "no-repeat" {
        "bg-repeat"
    } else if value.starts_with("clip-") {
        "bg-clip"
    } else if value.starts_with("origin-") {
        "bg-origin"
    } else if value.starts_with("blend-") {
        "bg-blend"
    } else if value == "none" || value.starts_with("gradient-") {
        "bg-image"
    } else if let Some(inner) = arbitrary(value) {
        if inner.starts_with("url(") || inner.contains("gradient(") {
            "bg-image"
        } else if inner.starts_with("position:") {
            "bg-position"
        } else if is_length(inner) {
            "bg-size"
        } else {
            "bg-color"
        }
    } else {
        "bg-color"
    }
}

fn rounded_group(rest: &str) -> String {
    let side = rest
        .strip_prefix('-')
        .map(|r| r.split('-').next().unwrap_or(r))
        .filter(|s| ROUNDED_SIDES.contains(s));
    match side {
        Some(side) => format!("rounded-{}", side),
        None => "rounded".to_string(),
    }
}

fn utility_group(utility: &str) -> String {
    if DISPLAY.contains(&utility) {
        return "display".to_string();
    }
    if POSITION.contains(&utility) {
        return "position".to_string();
    }
    if let Some(value) = utility.strip_prefix("text-") {
        return text_group(value).to_string();
    }
    if let Some(value) = utility.strip_prefix("bg-") {
        return bg_group(value).to_string();
    }
    if let Some(value) = utility.strip_prefix("font-") {
        let kind = if FONT_WEIGHTS.contains(&value) {
            "font-weight"
        } else {
            "font-family"
        };
        return kind.to_string();
    }
    if let Some(rest) = utility.strip_prefix("rounded") {
        if rest.is_empty() || rest.starts_with('-') {
            return rounded_group(rest);
        }
    }
    for prefix in PREFIXES {
        if let Some(rest) = utility.strip_prefix(prefix) {
            if rest.starts_with('-') {
                return (*prefix).to_string();
            }
        }
    }
    format!("={}", utility)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_in_order() {
        assert_eq!(cn(&["flex", "items-center", "w-full"]), "flex items-center w-full");
    }

    #[test]
    fn later_utility_wins() {
        assert_eq!(cn(&["p-2 bg-red-500", "p-4"]), "bg-red-500 p-4");
        assert_eq!(cn(&["bg-[#101010]", "bg-black"]), "bg-black");
    }

    #[test]
    fn axis_padding_does_not_clash_with_padding() {
        assert_eq!(cn(&["px-2", "p-4"]), "px-2 p-4");
        assert_eq!(cn(&["px-2", "px-6"]), "px-6");
    }

    #[test]
    fn text_size_colour_and_alignment_are_separate() {
        assert_eq!(
            cn(&["text-sm text-white text-center", "text-lg"]),
            "text-white text-center text-lg"
        );
        assert_eq!(cn(&["text-white", "text-slate-200"]), "text-slate-200");
    }

    #[test]
    fn arbitrary_text_size_is_not_a_colour() {
        assert_eq!(cn(&["text-[14px]", "text-white"]), "text-[14px] text-white");
        assert_eq!(cn(&["text-[14px]", "text-lg"]), "text-lg");
        assert_eq!(cn(&["text-[#101010]", "text-white"]), "text-white");
        assert_eq!(cn(&["text-sm/6", "text-[1.5rem]"]), "text-[1.5rem]");
    }

    #[test]
    fn background_groups_are_split() {
        assert_eq!(cn(&["bg-red-500", "bg-opacity-50"]), "bg-red-500 bg-opacity-50");
        assert_eq!(cn(&["bg-opacity-50", "bg-opacity-75"]), "bg-opacity-75");
        assert_eq!(cn(&["bg-black", "bg-cover bg-center"]), "bg-black bg-cover bg-center");
        assert_eq!(cn(&["bg-[url(/keys.png)]", "bg-red-500"]), "bg-[url(/keys.png)] bg-red-500");
        assert_eq!(cn(&["bg-no-repeat", "bg-repeat-x"]), "bg-repeat-x");
        assert_eq!(
            cn(&["md:bg-[url(https://a/b.png)]", "md:bg-none"]),
            "md:bg-none"
        );
    }

    #[test]
    fn rounded_sides_are_separate() {
        assert_eq!(cn(&["rounded-lg", "rounded-t-none"]), "rounded-lg rounded-t-none");
        assert_eq!(cn(&["rounded", "rounded-md"]), "rounded-md");
        assert_eq!(cn(&["rounded-tl-lg", "rounded-tl"]), "rounded-tl");
    }

    #[test]
    fn display_utilities_conflict() {
        assert_eq!(cn(&["flex", "hidden"]), "hidden");
    }

    #[test]
    fn variants_keep_separate_groups() {
        assert_eq!(cn(&["p-2", "md:p-4", "hover:bg-gray-100"]), "p-2 md:p-4 hover:bg-gray-100");
        assert_eq!(cn(&["md:p-2", "md:p-4"]), "md:p-4");
    }

    #[test]
    fn unknown_tokens_are_kept_and_deduplicated() {
        assert_eq!(cn(&["canvas-host", "shadow", "canvas-host"]), "shadow canvas-host");
    }

    #[test]
    fn conditional_classes() {
        let playing = true;
        let list = ClassList::new()
            .add("opacity-50 w-full")
            .add_if(playing, "opacity-100")
            .add_if(!playing, "cursor-wait");
        assert_eq!(list.merge(), "w-full opacity-100");
    }

    #[test]
    fn whitespace_is_normalised() {
        assert_eq!(cn(&["  h-full\n", "", "\tw-full "]), "h-full w-full");
        assert_eq!(cn(&[]), "");
    }

    #[test]
    fn negative_values_share_the_group() {
        assert_eq!(cn(&["-mt-2", "mt-4"]), "mt-4");
    }
}
