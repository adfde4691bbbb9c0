use clap::{Parser, ValueEnum};
use highlight::{
    BoundaryRule, HighlightConfig, HighlightOptions, HighlightStyle, ShortTokenPolicy,
    WalkOptions,
};
use std::path::PathBuf;

/// Highlight search matches inside the elements of an HTML file that carry a class.
#[derive(Debug, Parser)]
#[command(name = "textmark", version)]
pub struct Cli {
    /// HTML file to read, or `-` for stdin.
    pub input: PathBuf,

    /// Class name of the containers to process.
    #[arg(long = "class", value_name = "CLASS")]
    pub class_name: String,

    /// Text to highlight. Empty clears existing highlights.
    #[arg(long, short, default_value = "")]
    pub query: String,

    /// Match each whitespace-separated word on its own.
    #[arg(long)]
    pub per_word: bool,

    #[arg(long)]
    pub case_sensitive: bool,

    /// Inline style override for markers, e.g. `--style background=orange`.
    #[arg(long = "style", value_name = "PROP=VALUE", value_parser = parse_style_pair)]
    pub styles: Vec<(String, String)>,

    /// Length limit used by the whole-word rule.
    #[arg(long, default_value_t = ShortTokenPolicy::default().max_len)]
    pub short_token_len: usize,

    /// Which tokens must match whole words.
    #[arg(long, value_enum, default_value_t = Boundary::Short)]
    pub boundary: Boundary,

    /// Remove highlights instead of adding them.
    #[arg(long)]
    pub remove: bool,

    /// Also search inside script, style and head content.
    #[arg(long)]
    pub include_non_rendering: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Boundary {
    Short,
    Long,
    Never,
}

impl From<Boundary> for BoundaryRule {
    fn from(value: Boundary) -> Self {
        match value {
            Boundary::Short => BoundaryRule::ShortTokens,
            Boundary::Long => BoundaryRule::LongTokens,
            Boundary::Never => BoundaryRule::Never,
        }
    }
}

fn parse_style_pair(raw: &str) -> Result<(String, String), String> {
    let (property, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected PROP=VALUE, got {raw:?}"))?;
    let property = property.trim();
    if property.is_empty() {
        return Err(format!("missing property name in {raw:?}"));
    }
    Ok((property.to_string(), value.trim().to_string()))
}

impl Cli {
    pub fn config(&self) -> HighlightConfig {
        HighlightConfig {
            case_sensitive: self.case_sensitive,
            short_tokens: ShortTokenPolicy {
                max_len: self.short_token_len,
                applies_to: self.boundary.into(),
            },
            walk: WalkOptions {
                skip_non_rendering: !self.include_non_rendering,
            },
        }
    }

    pub fn options(&self) -> HighlightOptions {
        let mut options = HighlightOptions::new(self.query.as_str(), self.class_name.as_str());
        options.highlight_as_single_string = !self.per_word;
        if !self.styles.is_empty() {
            options.highlight_style = Some(self.styles.iter().cloned().collect::<HighlightStyle>());
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_onto_library_defaults() {
        let cli = Cli::try_parse_from(["textmark", "page.html", "--class", "results"]).unwrap();
        assert_eq!(cli.config(), HighlightConfig::default());
        let options = cli.options();
        assert!(options.highlight_as_single_string);
        assert!(options.highlight_style.is_none());
        assert!(options.search_text.is_empty());
    }

    #[test]
    fn flags_build_options_and_config() {
        let cli = Cli::try_parse_from([
            "textmark",
            "-",
            "--class",
            "results",
            "-q",
            "cat sat",
            "--per-word",
            "--case-sensitive",
            "--style",
            "color = white",
            "--style",
            "background=orange",
            "--boundary",
            "never",
            "--include-non-rendering",
        ])
        .unwrap();
        let config = cli.config();
        assert!(config.case_sensitive);
        assert_eq!(config.short_tokens.applies_to, BoundaryRule::Never);
        assert!(!config.walk.skip_non_rendering);

        let options = cli.options();
        assert!(!options.highlight_as_single_string);
        let style = options.highlight_style.expect("style overrides given");
        assert_eq!(
            style.properties(),
            [
                ("color".to_string(), "white".to_string()),
                ("background".to_string(), "orange".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_style_is_rejected() {
        let err = Cli::try_parse_from([
            "textmark", "a.html", "--class", "x", "--style", "color",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("PROP=VALUE"));
    }
}
