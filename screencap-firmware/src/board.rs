//! Host board: the peripherals the event loop runs on

use std::marker::PhantomData;

use screencap_core::Board;
use screencap_display::{GaugePanel, MemoryFramebuffer};
use screencap_hal_std::{ConsoleButtons, DirStorage, HostLink, StdClock, TcpAdapter};

/// Board made of host resources
///
/// `'a` is the lifetime of the framebuffer memory and artwork the panel
/// borrows.
pub struct HostBoard<'a>(PhantomData<&'a ()>);

impl<'a> Board for HostBoard<'a> {
    type Display = GaugePanel<'a, MemoryFramebuffer<'a>>;
    type Storage = DirStorage;
    type Net = TcpAdapter;
    type Wifi = HostLink;
    type Buttons = ConsoleButtons;
    type Clock = StdClock;
}
