use crate::errors::Result;

/// Conversion between domain element values and their persisted string form.
///
/// Context windows are generic over the element type, so a persisted sample or
/// classifier cannot know how to revive its values on its own. A codec is
/// passed to the load functions to decode each stored string back into the
/// domain type, and to the save functions to encode it.
pub trait ElementCodec {
    /// The domain element type carried in context windows.
    type Element;

    /// Encodes an element into its persisted string form.
    fn encode(&self, element: &Self::Element) -> String;

    /// Decodes an element from its persisted string form.
    ///
    /// # Errors
    ///
    /// An error variant is returned when the stored string is not a valid
    /// encoding of the element type.
    fn decode(&self, raw: &str) -> Result<Self::Element>;
}

/// Codec for plain string elements, as used by part-of-speech tagging.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl ElementCodec for StringCodec {
    type Element = String;

    fn encode(&self, element: &String) -> String {
        element.clone()
    }

    fn decode(&self, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }
}
