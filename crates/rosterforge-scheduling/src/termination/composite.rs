//! Composite termination conditions.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use rosterforge_core::Score;

use super::{RoundProgress, Termination};

/// Combines terminations with OR logic: terminates when ANY child does.
///
/// # Examples
///
/// ```
/// use rosterforge_scheduling::termination::{
///     OrTermination, RoundCountTermination, TimeTermination,
/// };
///
/// // Terminate after 30 seconds OR 100 rounds
/// let termination = OrTermination((
///     TimeTermination::seconds(30),
///     RoundCountTermination::new(100),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<Sc, $($T),+> Termination<Sc> for OrTermination<($($T,)+)>
        where
            Sc: Score,
            $($T: Termination<Sc>,)+
        {
            fn is_terminated(&self, progress: &RoundProgress<Sc>) -> bool {
                $((self.0).$idx.is_terminated(progress))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4);
impl_or_termination!(0: T0, 1: T1, 2: T2, 3: T3, 4: T4, 5: T5);
