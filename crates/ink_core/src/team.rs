//! Team identity

/// Team affiliation of an agent, weapon, or projectile
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Team {
    /// No affiliation (world geometry, neutral props)
    #[default]
    Unaffiliated,
    /// First team
    Red,
    /// Second team
    Blue,
}

impl Team {
    /// Paint channel written by this team's ink stamps
    ///
    /// Unaffiliated sources leave no mark.
    pub fn paint_channel(&self) -> Option<f32> {
        match self {
            Team::Red => Some(0.0),
            Team::Blue => Some(1.0),
            Team::Unaffiliated => None,
        }
    }

    /// Whether two teams are hostile to each other
    pub fn is_hostile_to(&self, other: Team) -> bool {
        *self != Team::Unaffiliated && other != Team::Unaffiliated && *self != other
    }
}
