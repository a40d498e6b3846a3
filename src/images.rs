/// A single installable image published in a compose.
///
/// Produced in bulk by the metadata lookup; read-only for the rest of the
/// pipeline.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImageDescriptor {
    pub url: String,
    pub arch: String,
    pub variant: String,
    pub subvariant: Option<String>,
    pub image_type: Option<String>,
    /// Hex-encoded SHA256 digest published alongside the image.
    pub sha256: String,
}

impl ImageDescriptor {
    /// The local file name for this image: the final segment of its URL.
    pub fn filename(&self) -> &str { self.url.rsplit('/').next().unwrap_or(&self.url) }
}

/// Criteria given on the command line, applied once to a compose's images.
#[derive(Clone, Debug)]
pub struct SelectionCriteria {
    pub arch: String,
    pub variant: String,
    pub subvariant: Option<String>,
    pub image_type: Option<String>,
}

impl SelectionCriteria {
    fn matches(&self, image: &ImageDescriptor) -> bool {
        if image.arch != self.arch || image.variant != self.variant {
            return false;
        }

        // Subvariant and type are mutually exclusive selectors: subvariant
        // wins when both are given.
        if let Some(subvariant) = &self.subvariant {
            image.subvariant.as_deref() == Some(subvariant.as_str())
        } else if let Some(image_type) = &self.image_type {
            image.image_type.as_deref() == Some(image_type.as_str())
        } else {
            true
        }
    }
}

/// Returns the subset of `images` matching all of the given criteria.
///
/// Zero matches is a reported condition, not an error.
pub fn filter_images(
    images: &[ImageDescriptor],
    criteria: &SelectionCriteria,
) -> Vec<ImageDescriptor> {
    images.iter().filter(|image| criteria.matches(image)).cloned().collect()
}
