//! Pure podium geometry. Nothing in here touches pixels or performs IO.

pub(crate) mod podium;
