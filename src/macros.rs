// The tt-muncher approach follows serde_json's json! macro, cut down to
// the shapes an NBT literal needs.

/// Build a [`Value`](crate::Value) from a literal.
///
/// Compounds keep the order their keys are written in. The typed array
/// forms take plain integer expressions:
///
/// ```
/// use polynbt::nbt;
///
/// let v = nbt!({
///     "name": "Cleric",
///     "health": 20.0f32,
///     "motion": [0.1, 0.0, -0.3],
///     "pattern": [B; 1, -1, 127],
/// });
/// ```
#[macro_export]
macro_rules! nbt {
    //////////////////////////////////////////////////////////////////////////
    // List muncher: one element per step, accumulated in the leading
    // bracket group. Nested `{...}` and `[...]` groups must re-enter nbt!
    // before the expression fallback can try (and fail) to parse them as
    // Rust expressions; anything else is a plain expression element.
    //////////////////////////////////////////////////////////////////////////

    (@list [$($done:expr,)*] {$($inner:tt)*} , $($rest:tt)*) => {
        nbt!(@list [$($done,)* nbt!({$($inner)*}),] $($rest)*)
    };

    (@list [$($done:expr,)*] {$($inner:tt)*}) => {
        vec![$($done,)* nbt!({$($inner)*})]
    };

    (@list [$($done:expr,)*] [$($inner:tt)*] , $($rest:tt)*) => {
        nbt!(@list [$($done,)* nbt!([$($inner)*]),] $($rest)*)
    };

    (@list [$($done:expr,)*] [$($inner:tt)*]) => {
        vec![$($done,)* nbt!([$($inner)*])]
    };

    (@list [$($done:expr,)*] $next:expr , $($rest:tt)*) => {
        nbt!(@list [$($done,)* nbt!($next),] $($rest)*)
    };

    (@list [$($done:expr,)*] $last:expr) => {
        vec![$($done,)* nbt!($last)]
    };

    // Nothing left: the list ended, possibly with a trailing comma.
    (@list [$($done:expr,)*]) => {
        vec![$($done,)*]
    };

    //////////////////////////////////////////////////////////////////////////
    // Compound muncher: one `key: value` entry per step, inserted into the
    // given map variable. A key is a single token, in practice a string
    // literal or a parenthesized expression. Values dispatch like list
    // elements.
    //////////////////////////////////////////////////////////////////////////

    (@compound $map:ident $key:tt : {$($inner:tt)*} , $($rest:tt)*) => {
        let _ = $map.insert(($key).into(), nbt!({$($inner)*}));
        nbt!(@compound $map $($rest)*);
    };

    (@compound $map:ident $key:tt : {$($inner:tt)*}) => {
        let _ = $map.insert(($key).into(), nbt!({$($inner)*}));
    };

    (@compound $map:ident $key:tt : [$($inner:tt)*] , $($rest:tt)*) => {
        let _ = $map.insert(($key).into(), nbt!([$($inner)*]));
        nbt!(@compound $map $($rest)*);
    };

    (@compound $map:ident $key:tt : [$($inner:tt)*]) => {
        let _ = $map.insert(($key).into(), nbt!([$($inner)*]));
    };

    (@compound $map:ident $key:tt : $value:expr , $($rest:tt)*) => {
        let _ = $map.insert(($key).into(), nbt!($value));
        nbt!(@compound $map $($rest)*);
    };

    (@compound $map:ident $key:tt : $value:expr) => {
        let _ = $map.insert(($key).into(), nbt!($value));
    };

    // Nothing left: the entries ended, possibly with a trailing comma.
    (@compound $map:ident) => {};

    //////////////////////////////////////////////////////////////////////////
    // The public shapes.
    //////////////////////////////////////////////////////////////////////////

    // Typed arrays hold native sized integers, so their elements are plain
    // expressions rather than nested values.
    ([B; $($elems:expr),* $(,)?]) => {
        $crate::Value::ByteArray(vec![$($elems),*])
    };

    ([I; $($elems:expr),* $(,)?]) => {
        $crate::Value::IntArray(vec![$($elems),*])
    };

    ([L; $($elems:expr),* $(,)?]) => {
        $crate::Value::LongArray(vec![$($elems),*])
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($tt:tt)+ ]) => {
        $crate::Value::List(nbt!(@list [] $($tt)+))
    };

    ({}) => {
        $crate::Value::Compound($crate::Compound::new())
    };

    ({ $($tt:tt)+ }) => {
        $crate::Value::Compound({
            let mut map = $crate::Compound::new();
            nbt!(@compound map $($tt)+);
            map
        })
    };

    // Any value of T where polynbt::Value: From<T>.
    ($other:expr) => {
        $crate::Value::from($other)
    };
}
