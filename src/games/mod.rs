pub mod geo;
pub mod gugudan;
pub mod leaderboard;
pub mod screens;
pub mod session;
pub mod timer;

pub struct GameDescriptor
{
    pub name: &'static str,
    pub description: &'static str,
}

pub fn registry() -> Vec<GameDescriptor>
{
    vec![GameDescriptor {
        name: "geo",
        description: "Name the country or city the map flies to",
    },
    GameDescriptor {
        name: "gugudan",
        description: "Multiplication table drill against a shrinking clock",
    }]
}
