//! Writing container entries out in interchange formats.
//!
//! Each format is an [`Exporter`]; an [`ExportRegistry`] maps file
//! extensions to exporters and is built by the caller, so tools can offer
//! exactly the formats they register.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use cgtex_bcn::DecodeOptions;
use cgtex_container::TextureEntry;
use image::codecs::png::PngEncoder;
use tracing::debug;

use crate::preview::decompress_level_with;
use crate::{Error, Result};

/// A format textures can be exported to.
pub trait Exporter: Send + Sync {
    /// Lowercase file extension without the dot.
    fn extension(&self) -> &'static str;

    /// Human-readable description.
    fn description(&self) -> &'static str;

    /// Write mip level `level` of `entry` to `writer`.
    fn export(&self, entry: &TextureEntry, level: usize, writer: &mut dyn Write) -> Result<()>;
}

/// Decodes a level and writes it as an RGBA PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter {
    pub options: DecodeOptions,
}

impl PngExporter {
    /// Exporter decoding with `options`.
    pub fn with_options(options: DecodeOptions) -> Self {
        Self { options }
    }
}

impl Exporter for PngExporter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn description(&self) -> &'static str {
        "PNG image (decoded RGBA)"
    }

    fn export(&self, entry: &TextureEntry, level: usize, writer: &mut dyn Write) -> Result<()> {
        let image = decompress_level_with(entry, level, &self.options)?;
        image.write_with_encoder(PngEncoder::new(writer))?;
        Ok(())
    }
}

/// Writes the compressed data unchanged under a DDS header.
///
/// The file holds `level` and every smaller level after it.
#[derive(Debug, Clone, Copy, Default)]
pub struct DdsExporter;

impl Exporter for DdsExporter {
    fn extension(&self) -> &'static str {
        "dds"
    }

    fn description(&self) -> &'static str {
        "DirectDraw Surface (compressed, with mip chain)"
    }

    fn export(&self, entry: &TextureEntry, level: usize, writer: &mut dyn Write) -> Result<()> {
        if level == 0 {
            cgtex_dds::write_dds(writer, entry)?;
            return Ok(());
        }

        let levels = entry.levels().get(level..).filter(|rest| !rest.is_empty()).ok_or_else(|| {
            Error::LevelOutOfRange {
                name: entry.name().to_string(),
                level,
                available: entry.levels().len(),
            }
        })?;
        // Level sizes only shrink, so they still fit the base size type.
        let (width, height) = entry.level_dimensions(level as u32);
        let sub_chain = TextureEntry::new(width as u16, height as u16, entry.name(), entry.format(), levels.to_vec());
        cgtex_dds::write_dds(writer, &sub_chain)?;
        Ok(())
    }
}

/// Extension to exporter mapping.
pub struct ExportRegistry {
    exporters: BTreeMap<&'static str, Box<dyn Exporter>>,
}

impl ExportRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            exporters: BTreeMap::new(),
        }
    }

    /// Registry with the PNG and DDS exporters.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(PngExporter::default()).register(DdsExporter);
        registry
    }

    /// Add an exporter, replacing any with the same extension.
    pub fn register<E: Exporter + 'static>(&mut self, exporter: E) -> &mut Self {
        self.exporters.insert(exporter.extension(), Box::new(exporter));
        self
    }

    /// Look up an exporter by extension, ignoring case.
    pub fn get(&self, extension: &str) -> Option<&dyn Exporter> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        self.exporters.get(extension.as_str()).map(Box::as_ref)
    }

    /// Registered extensions in sorted order.
    pub fn extensions(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.exporters.keys().copied()
    }

    /// All registered exporters.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Exporter> {
        self.exporters.values().map(Box::as_ref)
    }

    /// Export one level of `entry` to a file at `path`.
    pub fn export_to_path(&self, extension: &str, entry: &TextureEntry, level: usize, path: &Path) -> Result<()> {
        let exporter = self
            .get(extension)
            .ok_or_else(|| Error::UnknownExportFormat(extension.to_string()))?;

        let mut writer = BufWriter::new(File::create(path)?);
        exporter.export(entry, level, &mut writer)?;
        writer.flush()?;
        debug!(name = entry.name(), level, path = %path.display(), "exported texture");
        Ok(())
    }
}

impl Default for ExportRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ExportRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.exporters.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RawExporter;

    impl Exporter for RawExporter {
        fn extension(&self) -> &'static str {
            "bin"
        }

        fn description(&self) -> &'static str {
            "raw level bytes"
        }

        fn export(&self, entry: &TextureEntry, level: usize, writer: &mut dyn Write) -> Result<()> {
            writer.write_all(entry.level(level).unwrap_or_default())?;
            Ok(())
        }
    }

    fn red_mips() -> TextureEntry {
        let red = [0x00, 0xF8, 0x00, 0xF8, 0, 0, 0, 0];
        TextureEntry::new(8, 8, "red", 1, vec![red.repeat(4), red.to_vec(), red.to_vec(), red.to_vec()])
    }

    #[test]
    fn test_defaults() {
        let registry = ExportRegistry::with_defaults();
        assert_eq!(registry.extensions().collect::<Vec<_>>(), ["dds", "png"]);
        assert!(registry.get("PNG").is_some());
        assert!(registry.get(".dds").is_some());
        assert!(registry.get("tga").is_none());
    }

    #[test]
    fn test_register_custom() {
        let mut registry = ExportRegistry::new();
        registry.register(RawExporter);
        assert_eq!(registry.iter().count(), 1);

        let mut out = Vec::new();
        let exporter = registry.get("bin").unwrap();
        exporter.export(&red_mips(), 1, &mut out).unwrap();
        assert_eq!(out.len(), 8);
    }

    #[test]
    fn test_png_signature() {
        let mut out = Vec::new();
        PngExporter::default().export(&red_mips(), 0, &mut out).unwrap();
        assert_eq!(&out[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_dds_sub_chain() {
        let mut out = Vec::new();
        DdsExporter.export(&red_mips(), 1, &mut out).unwrap();

        // 4x4 header with three 8-byte levels.
        assert_eq!(out.len(), 128 + 24);
        assert_eq!(&out[12..16], &4u32.to_le_bytes());
        assert_eq!(&out[28..32], &3u32.to_le_bytes());

        let mut out = Vec::new();
        assert!(matches!(
            DdsExporter.export(&red_mips(), 4, &mut out),
            Err(Error::LevelOutOfRange { level: 4, .. })
        ));
    }
}
