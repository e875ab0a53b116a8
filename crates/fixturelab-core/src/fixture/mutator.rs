use crate::xml::XmlDocument;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces "expected" stub fixtures by blanking a random subset of field
/// texts in a merged document.
///
/// The seed is a required constructor argument: stub fixtures must be
/// reproducible per run, so there is no ambient-RNG constructor.
pub struct StubMutator {
    rng: StdRng,
}

impl StubMutator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Walk every element of the document (not only leaves) and, for each
    /// one whose text is currently non-empty, independently replace that
    /// text with the empty string with the given probability. Elements
    /// without text, or with already-empty text, are left untouched.
    ///
    /// `probability <= 0.0` blanks nothing and `probability >= 1.0` blanks
    /// every candidate; no clamping is needed for out-of-range values.
    /// Returns the number of texts blanked.
    pub fn blank_fields(&mut self, doc: &mut XmlDocument, probability: f64) -> usize {
        let Some(root) = doc.root() else {
            return 0;
        };

        let candidates: Vec<_> = doc
            .descendants(root)
            .filter(|&id| {
                doc.get(id).map(|d| d.is_element()).unwrap_or(false)
                    && doc.text(id).map(|t| !t.is_empty()).unwrap_or(false)
            })
            .collect();

        let mut blanked = 0;
        for id in candidates {
            if self.rng.random::<f64>() < probability {
                doc.set_text(id, "");
                blanked += 1;
            }
        }
        blanked
    }
}
