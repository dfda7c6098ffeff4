use std::fmt;

/// Standalone PNG outputs, written in this order.
pub const PNG_TARGETS: &[(&str, u32)] = &[
    // macOS app icon sizes
    ("icon_16x16.png", 16),
    ("icon_32x32.png", 32),
    ("icon_128x128.png", 128),
    ("icon_256x256.png", 256),
    ("icon_512x512.png", 512),
    ("icon_1024x1024.png", 1024),
    // web favicon sizes
    ("favicon-16x16.png", 16),
    ("favicon-32x32.png", 32),
    ("favicon-96x96.png", 96),
    ("favicon-192x192.png", 192),
    ("apple-touch-icon.png", 180),
];

/// File name of the Windows icon container.
pub const ICO_FILE_NAME: &str = "favicon.ico";

/// Images embedded in the Windows icon container, in directory order.
pub const ICO_SIZES: [u32; 4] = [16, 32, 48, 64];

/// PNGs staged for packaging into an ICNS bundle with `iconutil`.
pub const ICNS_STAGING_SIZES: [u32; 6] = [16, 32, 128, 256, 512, 1024];

/// Returns the file name under which a staged ICNS image of the given size is
/// written (e.g. `icon_128x128.png`).
pub fn staged_png_name(size: u32) -> String {
    format!("icon_{size}x{size}.png")
}

/// One of the images an `.iconset` directory may contain, identified by its
/// size in points and its pixel density.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IconsetSlot {
    points: u32,
    scale: u32,
}

/// Every slot of a complete iconset, in the order `iconutil` documents them.
pub const ICONSET_SLOTS: [IconsetSlot; 10] = [
    IconsetSlot::new(16, 1),
    IconsetSlot::new(16, 2),
    IconsetSlot::new(32, 1),
    IconsetSlot::new(32, 2),
    IconsetSlot::new(128, 1),
    IconsetSlot::new(128, 2),
    IconsetSlot::new(256, 1),
    IconsetSlot::new(256, 2),
    IconsetSlot::new(512, 1),
    IconsetSlot::new(512, 2),
];

impl IconsetSlot {
    /// Creates a slot for an icon `points` wide at the given density (1 for
    /// standard, 2 for "retina").
    pub const fn new(points: u32, scale: u32) -> IconsetSlot {
        IconsetSlot { points, scale }
    }

    /// Returns the pixel dimensions of the image this slot holds.
    ///
    /// # Examples
    /// ```
    /// use favicon_gen::IconsetSlot;
    /// assert_eq!(IconsetSlot::new(128, 1).pixel_size(), 128);
    /// assert_eq!(IconsetSlot::new(128, 2).pixel_size(), 256);
    /// ```
    pub fn pixel_size(self) -> u32 {
        self.points * self.scale
    }

    /// Returns the file name `iconutil` expects for this slot.
    pub fn file_name(self) -> String {
        self.to_string()
    }

    /// Picks the staged PNG size that fills this slot: the smallest staged
    /// size at least as large as the slot, or the largest one if none is.
    ///
    /// # Examples
    /// ```
    /// use favicon_gen::IconsetSlot;
    /// assert_eq!(IconsetSlot::new(16, 2).source_size(), 32);
    /// assert_eq!(IconsetSlot::new(32, 2).source_size(), 128);
    /// ```
    pub fn source_size(self) -> u32 {
        let wanted = self.pixel_size();
        ICNS_STAGING_SIZES
            .iter()
            .copied()
            .filter(|&size| size >= wanted)
            .min()
            .unwrap_or(ICNS_STAGING_SIZES[ICNS_STAGING_SIZES.len() - 1])
    }

    /// Returns the name of the staged PNG that fills this slot.
    pub fn source_file_name(self) -> String {
        staged_png_name(self.source_size())
    }
}

impl fmt::Display for IconsetSlot {
    fn fmt(&self, out: &mut fmt::Formatter) -> fmt::Result {
        write!(out, "icon_{0}x{0}", self.points)?;
        if self.scale != 1 {
            write!(out, "@{}x", self.scale)?;
        }
        write!(out, ".png")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn png_targets_are_square_and_unique() {
        assert_eq!(PNG_TARGETS.len(), 11);
        let names: HashSet<&str> = PNG_TARGETS.iter().map(|&(name, _)| name).collect();
        assert_eq!(names.len(), PNG_TARGETS.len());
        assert!(PNG_TARGETS.contains(&("apple-touch-icon.png", 180)));
        assert_eq!(PNG_TARGETS[0], ("icon_16x16.png", 16));
    }

    #[test]
    fn staged_names_follow_convention() {
        let names: Vec<String> =
            ICNS_STAGING_SIZES.iter().map(|&size| staged_png_name(size)).collect();
        assert_eq!(names[0], "icon_16x16.png");
        assert_eq!(names[5], "icon_1024x1024.png");
    }

    #[test]
    fn iconset_slot_names() {
        let names: Vec<String> =
            ICONSET_SLOTS.iter().map(|slot| slot.file_name()).collect();
        assert_eq!(names[0], "icon_16x16.png");
        assert_eq!(names[3], "icon_32x32@2x.png");
        assert_eq!(IconsetSlot::new(512, 2).to_string(), "icon_512x512@2x.png");
    }

    #[test]
    fn every_slot_has_a_staged_source() {
        let sources: Vec<u32> =
            ICONSET_SLOTS.iter().map(|slot| slot.source_size()).collect();
        assert_eq!(sources, vec![16, 32, 32, 128, 128, 256, 256, 512, 512, 1024]);
        for slot in &ICONSET_SLOTS {
            assert!(slot.source_size() >= slot.pixel_size());
        }
    }
}
