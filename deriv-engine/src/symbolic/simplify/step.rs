/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `2+3 = 5`
    /// `2*3 = 6`
    /// `2^3 = 8`
    /// etc.
    FoldConstants,

    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `a-0 = a`
    SubtractZero,

    /// `0-a = -a`
    SubtractFromZero,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `a/1 = a`
    DivideOne,

    /// `0/a = 0`
    DivideZero,

    /// `a/a = 1`
    DivideSelf,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `a*3 = 3a`
    MoveCoefficient,

    /// `2*(3a) = 6a`
    /// `(2a)*b = 2(a*b)`
    /// `a*(2b) = 2(a*b)`
    CombineCoefficients,

    /// `(1/a)*b = b/a`
    /// `a*(1/b) = a/b`
    ReciprocalProduct,

    /// `cos(x)*x = x*cos(x)`
    ReorderFactors,
}
