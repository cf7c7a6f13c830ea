use std::fs::File;
use std::io::Read;
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use crate::config::{check_pages, ReferenceConfig};
use crate::error::{ConfigError, Result};
use crate::io::get_reader;
use crate::Page;

lazy_static! {
    // Page numbers are separated by any mix of whitespace and commas
    static ref SEPARATOR: Regex = Regex::new(r"[\s,]+").unwrap();
    static ref PAGE: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// Parses a reference string from text
///
/// Tokens are separated by whitespace and/or commas. Every token must be a non-negative integer no
/// greater than `max_page`
///
/// # Arguments
///
/// * `text`: The input text
/// * `max_page`: The highest page number accepted
///
/// returns: Result<Vec<Page>, ConfigError>
///
/// # Examples
///
/// ```
/// use pagelib::reference::parse_reference_string;
/// let pages = parse_reference_string("7 0, 1,2\n0", 999).unwrap();
/// assert_eq!(pages, vec![7, 0, 1, 2, 0]);
/// ```
pub fn parse_reference_string(text: &str, max_page: Page) -> Result<Vec<Page>> {
    let mut pages = Vec::new();
    for token in SEPARATOR.split(text.trim()).filter(|t| !t.is_empty()) {
        if !PAGE.is_match(token) {
            return Err(ConfigError::InvalidToken { token: token.to_string() });
        }
        // Digits only, so the only failure left is overflow, which is out of range anyway
        let page = token.parse::<Page>().map_err(|_| ConfigError::PageOutOfRange {
            page: Page::MAX,
            position: pages.len(),
            max: max_page,
        })?;
        pages.push(page);
    }
    check_pages(&pages, max_page)?;
    Ok(pages)
}

/// Reads and parses a reference string from a file
pub fn read_reference_file(file: File, max_page: Page) -> Result<Vec<Page>> {
    let mut reader = get_reader(file)?;
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_reference_string(&text, max_page)
}

/// Draws `count` pages uniformly from 0..=max_page
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use pagelib::reference::generate_reference_string;
/// let pages = generate_reference_string(50, 9, &mut StdRng::seed_from_u64(1));
/// assert_eq!(pages.len(), 50);
/// assert!(pages.iter().all(|&p| p <= 9));
/// ```
pub fn generate_reference_string<R: Rng + ?Sized>(count: usize, max_page: Page, rng: &mut R) -> Vec<Page> {
    (0..count).map(|_| rng.random_range(0..=max_page)).collect()
}

/// Produces the reference string described by a configuration
///
/// Random strings use a seeded generator when a seed is given, so runs can be reproduced
pub fn resolve(reference: &ReferenceConfig, max_page: Page) -> Result<Vec<Page>> {
    match reference {
        ReferenceConfig::Pages(pages) => {
            check_pages(pages, max_page)?;
            Ok(pages.clone())
        }
        ReferenceConfig::Random { count, seed: Some(seed) } => {
            Ok(generate_reference_string(*count, max_page, &mut StdRng::seed_from_u64(*seed)))
        }
        ReferenceConfig::Random { count, seed: None } => {
            Ok(generate_reference_string(*count, max_page, &mut rand::rng()))
        }
        ReferenceConfig::Trace(path) => read_reference_file(File::open(path)?, max_page),
    }
}
