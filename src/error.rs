//! Hardware error propagation

/// Which hardware group failed, wrapping the pin error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    Display(E),
    Lights(E),
    Button(E),
}

impl<E> Error<E> {
    /// Short tag for log lines
    pub fn source_name(&self) -> &'static str {
        match self {
            Error::Display(_) => "display",
            Error::Lights(_) => "lights",
            Error::Button(_) => "button",
        }
    }
}
