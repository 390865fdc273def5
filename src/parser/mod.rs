use tracing::debug;

use crate::error::{CopyError, CopyResult};
use crate::layout::{cell, Cursor, SheetLayout};
use crate::types::{AboutSection, ContactSection, ContentTree, CopyBlock, HeroSection};

/// Parse template rows into a [`ContentTree`].
///
/// This is the main entry point for the tabular reader. The value column is
/// picked by [`SheetLayout::detect`]: column 4 for the customer template,
/// column 3 for sheets produced by the fresh writer.
///
/// # Arguments
/// * `rows` - Rows as decoded from CSV/XLSX; ragged rows are fine
///
/// # Returns
/// * `Ok(ContentTree)` - Tree holding only the sections whose markers were seen
/// * `Err(CopyError::EmptyResult)` - No recognized section carried any value
///
/// # Example
/// ```
/// use sitecopy::parser::parse_rows;
///
/// let rows = vec![
///     vec!["Hero".to_string(), "A".to_string(), "".to_string(), "".to_string(), "Welcome".to_string()],
/// ];
/// let tree = parse_rows(&rows)?;
/// assert_eq!(tree.hero.unwrap().title.as_deref(), Some("Welcome"));
/// # Ok::<(), sitecopy::error::CopyError>(())
/// ```
pub fn parse_rows(rows: &[Vec<String>]) -> CopyResult<ContentTree> {
    parse_rows_with_layout(rows, SheetLayout::detect(rows))
}

/// Parse rows reading values from an explicit layout.
pub fn parse_rows_with_layout(rows: &[Vec<String>], layout: SheetLayout) -> CopyResult<ContentTree> {
    let seed = ContentTree {
        hero: Some(HeroSection::default()),
        about: Some(AboutSection::default()),
        contact: Some(ContactSection::default()),
        ..Default::default()
    };

    let (_, mut tree) = rows
        .iter()
        .fold((Cursor::default(), seed), |(cursor, mut tree), row| {
            let (cursor, step) = cursor.advance(row);
            if step.opened_block.is_some() {
                tree.products.push(Default::default());
            }
            if let Some(target) = step.target {
                let value = cell(row, layout.value_column).trim();
                if !value.is_empty() {
                    if let Some(block) = tree.block_mut(target.section, target.block) {
                        block.set(target.slot.field, value.to_string());
                    }
                }
            }
            (cursor, tree)
        });

    prune(&mut tree);

    if tree.is_empty() {
        return Err(CopyError::EmptyResult);
    }

    debug!(
        hero = tree.hero.is_some(),
        about = tree.about.is_some(),
        products = tree.products.len(),
        contact = tree.contact.is_some(),
        "parsed template rows"
    );

    Ok(tree)
}

/// Drop scalar sections with nothing in them; collapse the product list when
/// every block is empty.
fn prune(tree: &mut ContentTree) {
    if tree.hero.as_ref().is_some_and(|b| b.is_empty()) {
        tree.hero = None;
    }
    if tree.about.as_ref().is_some_and(|b| b.is_empty()) {
        tree.about = None;
    }
    if tree.contact.as_ref().is_some_and(|b| b.is_empty()) {
        tree.contact = None;
    }
    if tree.products.iter().all(|p| p.is_empty()) {
        tree.products.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_parse_hero_rows_with_keyword_in_every_row() {
        let tree = parse_rows(&rows(&[
            &["Hero", "A", "", "", "Welcome"],
            &["Hero", "B", "", "", "Desc"],
        ]))
        .unwrap();

        let hero = tree.hero.as_ref().unwrap();
        assert_eq!(hero.title.as_deref(), Some("Welcome"));
        assert_eq!(hero.description.as_deref(), Some("Desc"));
        assert!(tree.about.is_none());
        assert!(tree.contact.is_none());
        assert!(tree.products.is_empty());
    }

    #[test]
    fn test_empty_hero_is_dropped() {
        let tree = parse_rows(&rows(&[
            &["Hero"],
            &["", "A", "", "", "   "],
            &["About Us"],
            &["", "B", "", "", "Story"],
        ]))
        .unwrap();
        assert!(tree.hero.is_none());
        assert_eq!(tree.about.unwrap().title.as_deref(), Some("Story"));
    }

    #[test]
    fn test_products_keep_empty_blocks_when_any_block_has_data() {
        let tree = parse_rows(&rows(&[
            &["carousel 1"],
            &["", "A", "", "", ""],
            &["carousel 2"],
            &["", "A", "", "", "Second"],
        ]))
        .unwrap();
        assert_eq!(tree.products.len(), 2);
        assert!(tree.products[0].is_empty());
        assert_eq!(tree.products[1].title.as_deref(), Some("Second"));
    }

    #[test]
    fn test_no_sections_is_empty_result() {
        let err = parse_rows(&rows(&[&["Name", "Code"], &["", "A", "", "", "x"]])).unwrap_err();
        assert!(matches!(err, CopyError::EmptyResult));
    }

    #[test]
    fn test_unknown_item_codes_are_ignored() {
        let tree = parse_rows(&rows(&[
            &["Contact Us"],
            &["", "Z", "", "", "ignored"],
            &["", "D", "", "", "ignored too"],
            &["", "C", "", "", "Call us"],
        ]))
        .unwrap();
        let contact = tree.contact.unwrap();
        assert_eq!(contact.description.as_deref(), Some("Call us"));
        assert!(contact.badge.is_none());
    }
}
