/// The color model a pixel buffer represents.
///
/// The set is closed: every variant must have an entry in the routing table of
/// [`crate::router`]. `Unknown` carries no channel constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColorSpace {
    /// No colorspace has been set.
    #[default]
    Unknown,
    /// Blue, green, red.
    Bgr,
    /// Red, green, blue.
    Rgb,
    /// Hue, saturation, value with a full byte hue range.
    Hsv,
    /// Single channel luminance.
    Gray,
    /// Single channel highlight mask, white foreground on black.
    WhiteOnBlack,
}

impl ColorSpace {
    /// Every colorspace, `Unknown` included.
    pub const ALL: [ColorSpace; 6] = [
        ColorSpace::Unknown,
        ColorSpace::Bgr,
        ColorSpace::Rgb,
        ColorSpace::Hsv,
        ColorSpace::Gray,
        ColorSpace::WhiteOnBlack,
    ];

    /// The channel count a buffer in this colorspace must have, `None` for `Unknown`.
    pub const fn channels(self) -> Option<usize> {
        match self {
            ColorSpace::Bgr | ColorSpace::Rgb | ColorSpace::Hsv => Some(3),
            ColorSpace::Gray | ColorSpace::WhiteOnBlack => Some(1),
            ColorSpace::Unknown => None,
        }
    }

    /// Whether a buffer with `channels` channels may carry this tag.
    pub const fn accepts(self, channels: usize) -> bool {
        match self.channels() {
            Some(expected) => expected == channels,
            None => true,
        }
    }

    /// `Gray` or `WhiteOnBlack`.
    pub const fn is_single_channel(self) -> bool {
        matches!(self.channels(), Some(1))
    }

    /// `Bgr`, `Rgb` or `Hsv`.
    pub const fn is_triple_channel(self) -> bool {
        matches!(self.channels(), Some(3))
    }

    /// A short display name.
    pub const fn name(self) -> &'static str {
        match self {
            ColorSpace::Unknown => "Unknown",
            ColorSpace::Bgr => "BGR",
            ColorSpace::Rgb => "RGB",
            ColorSpace::Hsv => "HSV",
            ColorSpace::Gray => "Gray",
            ColorSpace::WhiteOnBlack => "WhiteOnBlack",
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::ColorSpace;

    #[test]
    fn channel_counts() {
        assert_eq!(ColorSpace::Bgr.channels(), Some(3));
        assert_eq!(ColorSpace::Rgb.channels(), Some(3));
        assert_eq!(ColorSpace::Hsv.channels(), Some(3));
        assert_eq!(ColorSpace::Gray.channels(), Some(1));
        assert_eq!(ColorSpace::WhiteOnBlack.channels(), Some(1));
        assert_eq!(ColorSpace::Unknown.channels(), None);
    }

    #[test]
    fn unknown_accepts_anything() {
        for channels in 0..6 {
            assert!(ColorSpace::Unknown.accepts(channels));
        }
        assert!(!ColorSpace::Gray.accepts(3));
        assert!(ColorSpace::Hsv.accepts(3));
    }

    #[test]
    fn default_is_unknown() {
        assert_eq!(ColorSpace::default(), ColorSpace::Unknown);
        assert_eq!(ColorSpace::Hsv.to_string(), "HSV");
    }

    #[test]
    fn channel_classes() {
        let single: Vec<_> = ColorSpace::ALL
            .into_iter()
            .filter(|c| c.is_single_channel())
            .collect();
        let triple: Vec<_> = ColorSpace::ALL
            .into_iter()
            .filter(|c| c.is_triple_channel())
            .collect();

        assert_eq!(single, [ColorSpace::Gray, ColorSpace::WhiteOnBlack]);
        assert_eq!(triple, [ColorSpace::Bgr, ColorSpace::Rgb, ColorSpace::Hsv]);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_round_trip() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&ColorSpace::WhiteOnBlack)?;
        assert_eq!(json, "\"WhiteOnBlack\"");
        assert_eq!(
            serde_json::from_str::<ColorSpace>(&json)?,
            ColorSpace::WhiteOnBlack
        );
        Ok(())
    }
}
