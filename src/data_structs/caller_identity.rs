/// Who is asking. Guests are a recognized identity, not a lookup miss: they get a
/// fixed virtual allowance and never touch the users table.
#[derive(Debug, PartialEq, Eq)]
#[derive(Clone)]
pub enum CallerIdentity {
    Guest,
    Identified(String),
}

impl CallerIdentity {
    /// Parses the raw userId a client sent. The literal "guest" in any casing, an
    /// empty string, and an absent id all resolve to the guest identity.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => CallerIdentity::Guest,
            Some(id) => {
                let id = id.trim();
                if id.is_empty() || id.eq_ignore_ascii_case("guest") {
                    CallerIdentity::Guest
                } else {
                    CallerIdentity::Identified(id.to_string())
                }
            }
        }
    }
}
