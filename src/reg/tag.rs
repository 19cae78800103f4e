/// Register access tag.
pub trait RegAccess: Sized + Send + Sync + 'static {}

/// Tag of a register that can be read.
pub trait RAccess: RegAccess {}

/// Tag of a register that can be written.
pub trait WAccess: RegAccess {}

/// Tag of a register that can only be written.
pub trait WoAccess: WAccess {}

/// Read-write register tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rw;

impl RegAccess for Rw {}
impl RAccess for Rw {}
impl WAccess for Rw {}

/// Read-only register tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ro;

impl RegAccess for Ro {}
impl RAccess for Ro {}

/// Write-only register tag.
///
/// Reading such a register back is either meaningless or destructive.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wo;

impl RegAccess for Wo {}
impl WAccess for Wo {}
impl WoAccess for Wo {}
