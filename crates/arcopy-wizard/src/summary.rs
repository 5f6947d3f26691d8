//! Cross-copy summary rendering for the final wizard page.

use arcopy_policy::{CopyConfiguration, MediaLabels, MessageCatalog, PolicyError, PolicyResult};

/// Padding between entries that share a line.
const ENTRY_PAD: &str = "\u{a0}\u{a0}\u{a0}";

/// Render the archive-age summary line: one `"<age> <unit> (<media>)"`
/// entry per configured copy, a line break after every second entry,
/// non-breaking padding otherwise. Copies without a validated age and
/// media are skipped.
///
/// # Errors
///
/// `ExternalLookup` when a unit-label or media-label lookup fails.
pub fn render<'a>(
    copies: impl Iterator<Item = &'a CopyConfiguration>,
    catalog: &dyn MessageCatalog,
    labels: &dyn MediaLabels,
) -> PolicyResult<String> {
    let mut text = String::new();
    let mut rendered = 0usize;
    for config in copies {
        let (Some(age), Some(media)) = (config.age, config.media_type) else {
            continue;
        };
        if rendered > 0 {
            text.push_str(if rendered % 2 == 0 { "\n" } else { ENTRY_PAD });
        }
        let unit = catalog
            .resolve(age.unit.label_key(), &[])
            .map_err(|failure| PolicyError::external("message_catalog", failure))?;
        let media_label = labels
            .label(media)
            .map_err(|failure| PolicyError::external("media_labels", failure))?;
        let value = age.value;
        text.push_str(&format!("{value} {unit} ({media_label})"));
        rendered += 1;
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use arcopy_policy::{AgeThreshold, AgeUnit, MediaType};
    use arcopy_test_support::fixtures::{console_media_labels, english_catalog};

    use super::*;

    fn copy(value: i64, unit: AgeUnit, media: MediaType) -> CopyConfiguration {
        CopyConfiguration {
            age: Some(AgeThreshold { value, unit }),
            media_type: Some(media),
            ..CopyConfiguration::default()
        }
    }

    #[test]
    fn two_entries_share_a_line_with_padding() -> Result<()> {
        let copies = [
            copy(30, AgeUnit::Minute, MediaType::Disk),
            copy(2, AgeUnit::Day, MediaType::Lto),
        ];
        let text = render(copies.iter(), &english_catalog(), &console_media_labels())?;
        assert_eq!(text, "30 Minutes (Disk)\u{a0}\u{a0}\u{a0}2 Days (LTO)");
        Ok(())
    }

    #[test]
    fn third_entry_starts_a_new_line() -> Result<()> {
        let copies = [
            copy(30, AgeUnit::Minute, MediaType::Disk),
            copy(2, AgeUnit::Day, MediaType::Lto),
            copy(4, AgeUnit::Hour, MediaType::Dlt),
        ];
        let text = render(copies.iter(), &english_catalog(), &console_media_labels())?;
        assert_eq!(
            text,
            "30 Minutes (Disk)\u{a0}\u{a0}\u{a0}2 Days (LTO)\n4 Hours (DLT)"
        );
        Ok(())
    }

    #[test]
    fn unconfigured_copies_are_skipped() -> Result<()> {
        let copies = [
            CopyConfiguration::default(),
            copy(1, AgeUnit::Week, MediaType::T9840),
        ];
        let text = render(copies.iter(), &english_catalog(), &console_media_labels())?;
        assert_eq!(text, "1 Weeks (STK 9840)");
        Ok(())
    }

    #[test]
    fn missing_media_label_surfaces_the_lookup_failure() {
        let copies = [copy(30, AgeUnit::Minute, MediaType::Ibm3590)];
        let labels = console_media_labels().without(MediaType::Ibm3590);
        let err = render(copies.iter(), &english_catalog(), &labels).unwrap_err();
        let PolicyError::ExternalLookup { operation, .. } = err else {
            panic!("expected external lookup failure");
        };
        assert_eq!(operation, "media_labels");
    }
}
