use crate::config::Options;
use crate::error::Result;
use crate::parser::css;
use crate::{serialize, transform};

pub mod dash_dash {
    use super::*;
    use log::info;
    use rayon::prelude::*;
    use std::fs;
    use std::path::Path;

    /// Reads `css_content`, rewrites its shorthand rules and prints it back.
    pub fn process(css_content: &str, options: &Options) -> Result<String> {
        process_with(css_content, options, false)
    }

    pub fn process_with(css_content: &str, options: &Options, minify: bool) -> Result<String> {
        let sheet = css::parse_stylesheet(css_content)?;
        transform::transform(&sheet, options)?;
        let output = serialize::to_css(&sheet);
        if minify {
            serialize::minify(&output)
        } else {
            Ok(output)
        }
    }

    /// Processes every file on its own tree, in parallel. Results come back in
    /// the order of `paths`.
    pub fn process_files<P>(paths: &[P], options: &Options, minify: bool) -> Vec<Result<String>>
    where
        P: AsRef<Path> + Sync,
    {
        paths
            .par_iter()
            .map(|path| -> Result<String> {
                let path = path.as_ref();
                let css_content = fs::read_to_string(path)?;
                let output = process_with(&css_content, options, minify)?;
                info!("processed {}", path.display());
                Ok(output)
            })
            .collect()
    }
}
