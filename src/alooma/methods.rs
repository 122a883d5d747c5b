use std::fmt;

/// Methods living directly on the alooma client object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RootMethod {
    Init,
    Push,
    Disable,
    Track,
    TrackLinks,
    TrackForms,
    Register,
    RegisterOnce,
    Unregister,
    Identify,
    GetDistinctId,
    Alias,
    SetConfig,
    GetConfig,
    GetProperty,
}

impl RootMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            RootMethod::Init => "init",
            RootMethod::Push => "push",
            RootMethod::Disable => "disable",
            RootMethod::Track => "track",
            RootMethod::TrackLinks => "track_links",
            RootMethod::TrackForms => "track_forms",
            RootMethod::Register => "register",
            RootMethod::RegisterOnce => "register_once",
            RootMethod::Unregister => "unregister",
            RootMethod::Identify => "identify",
            RootMethod::GetDistinctId => "get_distinct_id",
            RootMethod::Alias => "alias",
            RootMethod::SetConfig => "set_config",
            RootMethod::GetConfig => "get_config",
            RootMethod::GetProperty => "get_property",
        }
    }
}

/// Methods on the client's nested `people` object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PeopleMethod {
    Set,
    SetOnce,
    Increment,
    Append,
    TrackCharge,
    ClearCharges,
    DeleteUser,
}

impl PeopleMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeopleMethod::Set => "set",
            PeopleMethod::SetOnce => "set_once",
            PeopleMethod::Increment => "increment",
            PeopleMethod::Append => "append",
            PeopleMethod::TrackCharge => "track_charge",
            PeopleMethod::ClearCharges => "clear_charges",
            PeopleMethod::DeleteUser => "delete_user",
        }
    }
}

/// Fully qualified path of a client method.
///
/// Paths are structured rather than dotted strings so a typo cannot survive
/// to call time, and so [`AloomaGlobal`](crate::alooma::AloomaGlobal)
/// implementations can dispatch with an exhaustive match. People paths must
/// be invoked on the nested `people` object so the client keeps its own
/// receiver binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodPath {
    Root(RootMethod),
    People(PeopleMethod),
}

impl MethodPath {
    /// Every method the facade can forward.
    pub const ALL: [MethodPath; 22] = [
        MethodPath::Root(RootMethod::Init),
        MethodPath::Root(RootMethod::Push),
        MethodPath::Root(RootMethod::Disable),
        MethodPath::Root(RootMethod::Track),
        MethodPath::Root(RootMethod::TrackLinks),
        MethodPath::Root(RootMethod::TrackForms),
        MethodPath::Root(RootMethod::Register),
        MethodPath::Root(RootMethod::RegisterOnce),
        MethodPath::Root(RootMethod::Unregister),
        MethodPath::Root(RootMethod::Identify),
        MethodPath::Root(RootMethod::GetDistinctId),
        MethodPath::Root(RootMethod::Alias),
        MethodPath::Root(RootMethod::SetConfig),
        MethodPath::Root(RootMethod::GetConfig),
        MethodPath::Root(RootMethod::GetProperty),
        MethodPath::People(PeopleMethod::Set),
        MethodPath::People(PeopleMethod::SetOnce),
        MethodPath::People(PeopleMethod::Increment),
        MethodPath::People(PeopleMethod::Append),
        MethodPath::People(PeopleMethod::TrackCharge),
        MethodPath::People(PeopleMethod::ClearCharges),
        MethodPath::People(PeopleMethod::DeleteUser),
    ];

    /// Path segments from the client object down to the method.
    pub fn segments(&self) -> &'static [&'static str] {
        match self {
            MethodPath::Root(method) => match method {
                RootMethod::Init => &["init"],
                RootMethod::Push => &["push"],
                RootMethod::Disable => &["disable"],
                RootMethod::Track => &["track"],
                RootMethod::TrackLinks => &["track_links"],
                RootMethod::TrackForms => &["track_forms"],
                RootMethod::Register => &["register"],
                RootMethod::RegisterOnce => &["register_once"],
                RootMethod::Unregister => &["unregister"],
                RootMethod::Identify => &["identify"],
                RootMethod::GetDistinctId => &["get_distinct_id"],
                RootMethod::Alias => &["alias"],
                RootMethod::SetConfig => &["set_config"],
                RootMethod::GetConfig => &["get_config"],
                RootMethod::GetProperty => &["get_property"],
            },
            MethodPath::People(method) => match method {
                PeopleMethod::Set => &["people", "set"],
                PeopleMethod::SetOnce => &["people", "set_once"],
                PeopleMethod::Increment => &["people", "increment"],
                PeopleMethod::Append => &["people", "append"],
                PeopleMethod::TrackCharge => &["people", "track_charge"],
                PeopleMethod::ClearCharges => &["people", "clear_charges"],
                PeopleMethod::DeleteUser => &["people", "delete_user"],
            },
        }
    }

    /// Dotted rendering of the path, e.g. `people.set`.
    pub fn as_str(&self) -> &'static str {
        match self {
            MethodPath::Root(method) => method.as_str(),
            MethodPath::People(method) => match method {
                PeopleMethod::Set => "people.set",
                PeopleMethod::SetOnce => "people.set_once",
                PeopleMethod::Increment => "people.increment",
                PeopleMethod::Append => "people.append",
                PeopleMethod::TrackCharge => "people.track_charge",
                PeopleMethod::ClearCharges => "people.clear_charges",
                PeopleMethod::DeleteUser => "people.delete_user",
            },
        }
    }
}

impl From<RootMethod> for MethodPath {
    fn from(method: RootMethod) -> Self {
        MethodPath::Root(method)
    }
}

impl From<PeopleMethod> for MethodPath {
    fn from(method: PeopleMethod) -> Self {
        MethodPath::People(method)
    }
}

impl fmt::Display for MethodPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
