use crate::system::filter::SortKey;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    SortBy(SortKey),
    ToggleReverse,
    ToggleNetwork,
    FasterRefresh,
    SlowerRefresh,
    ToggleHelp,
    None,
}
