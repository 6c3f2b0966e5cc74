use super::{legacy::LegacyTickIter, modulo::ModuloTickIter, TickCandidate};

/// Candidates of one subsection span, whichever strategy produced them.
pub struct TickIter {
    inner: Box<dyn Iterator<Item = TickCandidate> + Send + 'static>,
}

impl TickIter {
    fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = TickCandidate> + Send + 'static,
    {
        Self {
            inner: Box::new(iter),
        }
    }

    /// A span whose window holds no grid point of any tier.
    pub(crate) fn empty() -> Self {
        Self::new(std::iter::empty())
    }

    pub(crate) fn from_legacy(iter: LegacyTickIter) -> Self {
        Self::new(iter)
    }

    pub(crate) fn from_modulo(iter: ModuloTickIter) -> Self {
        Self::new(iter)
    }
}

impl Iterator for TickIter {
    type Item = TickCandidate;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
