use bitflags::bitflags;

bitflags! {
    /// Context flags tracked by the rewrite engine while it walks the token
    /// stream. These compose; they are not mutually exclusive states.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RewriteFlags: u8 {
        /// The most recent completed Name equalled a function-definition
        /// head keyword (pre-translation spelling).
        const AFTER_DEF = 1 << 0;
        /// Inside the parenthesis pair that follows a definition head.
        const IN_DEF_PARENS = 1 << 1;
        /// A `.` operator was just seen; suppresses substitution for the
        /// next Name only.
        const AFTER_DOT = 1 << 2;
    }
}
