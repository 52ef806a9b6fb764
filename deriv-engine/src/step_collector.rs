/// Receives the identities the simplifier applies, in the order it applies them.
///
/// Pass `&mut ()` to discard them, or a `Vec` to keep them.
pub trait StepCollector<S> {
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
