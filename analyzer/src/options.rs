use specs::OptionsSpec;

/// Switches that change how parameters are counted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Leave the bias term out of convolution weight and connection counts.
    pub no_bias: bool,
}

impl From<&OptionsSpec> for Options {
    fn from(value: &OptionsSpec) -> Self {
        Self {
            no_bias: value.no_bias,
        }
    }
}
