/// Compile a regex literal once and hand out a `&'static Regex`.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Build a [`FlagSet`](crate::flags::FlagSet) from flag names.
///
/// ```
/// use autopick::flag_set;
/// use autopick::flags::Flag;
///
/// let set = flag_set![Average, Weapons];
/// assert!(set.contains(Flag::Weapons));
/// ```
#[macro_export]
macro_rules! flag_set {
    ($($flag:ident),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut set = $crate::flags::FlagSet::empty();
        $( set.insert($crate::flags::Flag::$flag); )*
        set
    }};
}
