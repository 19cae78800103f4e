use drone_mmio::reg;
use drone_mmio::reg::prelude::*;
use drone_mmio::reg::{validate_map, FieldSpan, MemIo};
use std::mem::size_of;
use tst_ctrl::{Arr, Div, Flags, Mode1, Psc, Speed};
use tst_irq::{Fault, Ie, Prio, Src};

reg! {
    /// Test control register.
    #[doc = "test register attribute"]
    pub mod TST CTRL;
    0x1000 32 RReg WReg;

    /// Status flags.
    FLAGS { 0 3 flag { F0, F1, F2 } }
    /// Enable mode.
    MODE1 { 4 1 mode { Off, On } }
    /// Speed mode.
    SPEED { 5 2 mode { Slow, Medium, Fast = 3, Turbo = 2 } }
    /// Prescaler.
    PSC { 8 8 value u8 }
    /// Auto-reload value.
    ARR { 16 8 value u16 }
    /// Clock divider.
    DIV { 24 4 value u8 }
}

reg! {
    /// Test status register.
    pub mod TST STATUS;
    0x1004 32 RReg RoReg;

    READY { 0 1 flag { Ready } }
    COUNT { 8 8 value u8 }
}

reg! {
    /// Test command register.
    pub mod TST CMD;
    0x1008 32 WReg WoReg;

    CMD { 0 4 flag { Start, Stop, Reset = 3 } }
    CODE { 8 4 value u8 }
}

reg! {
    pub mod TST BYTE;
    0x100C 8 RReg WReg;

    LOW { 0 4 value u8 }
    HIGH { 4 4 value u8 }
}

reg! {
    pub mod TST WIDE;
    0x2000 64 RReg WReg;

    LOW { 0 32 value u32 }
    TOP { 63 1 flag { Msb } }
}

reg! {
    /// Test interrupt register.
    pub mod TST IRQ;
    0x3000 16 RReg WReg;

    /// Interrupt enables at bits 0 and 3.
    IE { mask 0b1001 flag { Rx, Tx } }
    /// Priority between the enable bits.
    PRIO { 1 2 value u8 }
    /// Clock source, the last encoding is undefined.
    SRC { mask 0x30 mode { Hsi, Hse, Pll } }
    /// Fault flags at bits 6, 14 and 15.
    FAULT { mask 0xC040 flag { Parity, Frame = 8, Overrun } }
}

const BASE: usize = 0x1000;

type Io = MemIo<u32, 4>;

type IrqIo = MemIo<u16, 1>;

fn ctrl(io: &Io) -> tst_ctrl::Reg<&Io> {
    unsafe { tst_ctrl::Reg::new(io) }
}

fn ctrl_raw(io: &Io) -> u32 {
    io.peek(tst_ctrl::ADDRESS)
}

#[test]
fn size_of_reg() {
    assert_eq!(size_of::<tst_ctrl::Reg>(), 0);
    assert_eq!(size_of::<tst_ctrl::Val>(), 4);
    assert_eq!(size_of::<tst_byte::Val>(), 1);
    assert_eq!(size_of::<tst_wide::Val>(), 8);
}

#[test]
fn field_descriptors() {
    assert_eq!(<tst_ctrl::Reg as FixedReg>::ADDRESS, 0x1000);
    assert_eq!(<tst_ctrl::PscField as RegField>::OFFSET, 8);
    assert_eq!(<tst_ctrl::PscField as RegField>::WIDTH, 8);
    assert_eq!(<tst_ctrl::SpeedField as RegField>::mask(), 0b110_0000);
    assert_eq!(<tst_ctrl::Map as RegMap>::FIELDS[3], FieldSpan::new("PSC", 8, 8));
    assert_eq!(<tst_ctrl::Map as RegMap>::FIELDS.len(), 6);
    assert_eq!(validate_map::<tst_ctrl::Map>(), Ok(()));
    assert_eq!(validate_map::<tst_wide::Map>(), Ok(()));
}

#[test]
fn concrete_scenario() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set([Flags::F0, Flags::F1]);
    assert_eq!(ctrl_raw(&io), 0b011);
    ctrl.set(Mode1::On);
    assert_eq!(ctrl_raw(&io), 0b1_0011);
    ctrl.clear(Flags::F0);
    assert_eq!(ctrl_raw(&io), 0b1_0010);
    assert!(!ctrl.is_set(Flags::F0));
    ctrl.read().set(Flags::F2).write();
    assert_eq!(ctrl_raw(&io), 0b1_0110);
}

#[test]
fn no_cross_field_corruption() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    io.poke(tst_ctrl::ADDRESS, 0xFFFF_FFFF);
    ctrl.set(Psc(0));
    assert_eq!(ctrl_raw(&io), 0xFFFF_00FF);
    ctrl.clear(Flags::F1);
    assert_eq!(ctrl_raw(&io), 0xFFFF_00FD);
    ctrl.set(Speed::Slow);
    assert_eq!(ctrl_raw(&io), 0xFFFF_009D);
    ctrl.set(Div(0x1F));
    assert_eq!(ctrl_raw(&io), 0xFFFF_009D);
    assert_eq!(ctrl.get::<Div>(), Div(0xF));
}

#[test]
fn batched_flags() {
    let batched = Io::new(BASE);
    ctrl(&batched).set([Flags::F0, Flags::F2]);
    assert_eq!((batched.reads(), batched.writes()), (1, 1));

    let sequential = Io::new(BASE);
    ctrl(&sequential).set(Flags::F0);
    ctrl(&sequential).set(Flags::F2);
    assert_eq!((sequential.reads(), sequential.writes()), (2, 2));
    assert_eq!(ctrl_raw(&batched), ctrl_raw(&sequential));
    assert_eq!(ctrl_raw(&batched), 0b101);

    let set = Io::new(BASE);
    ctrl(&set).set(Flags::F0 | Flags::F2);
    assert_eq!(ctrl_raw(&set), 0b101);
    ctrl(&set).clear(&[Flags::F0, Flags::F2][..]);
    assert_eq!(ctrl_raw(&set), 0);
    assert_eq!((set.reads(), set.writes()), (2, 2));
}

#[test]
fn clear_after_set() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set(Flags::F1);
    assert!(ctrl.is_set(Flags::F1));
    ctrl.clear(Flags::F1);
    assert!(!ctrl.is_set(Flags::F1));
    ctrl.set(Psc(200));
    assert_eq!(ctrl.get::<Psc>(), Psc(200));
    ctrl.clear(Psc(0));
    assert_eq!(ctrl.get::<Psc>(), Psc(0));
    assert_eq!(ctrl_raw(&io), 0);
}

#[test]
fn mode_overwrite() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set(Speed::Fast);
    assert_eq!(ctrl_raw(&io), 0b110_0000);
    ctrl.set(Speed::Medium);
    assert_eq!(ctrl_raw(&io), 0b010_0000);
    assert_eq!(ctrl.get::<Speed>(), Speed::Medium);
    ctrl.set(Speed::Turbo);
    assert_eq!(ctrl.get::<Speed>(), Speed::Turbo);
    assert!(ctrl.is_set(Speed::Turbo));
    assert!(!ctrl.is_set(Speed::Fast));
}

#[test]
fn mode_decoding_is_total() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    for (raw, speed) in
        [(0, Speed::Slow), (1, Speed::Medium), (2, Speed::Turbo), (3, Speed::Fast)]
    {
        io.poke(tst_ctrl::ADDRESS, raw << 5 | 0x9F);
        assert_eq!(ctrl.get::<Speed>(), speed);
    }
}

#[test]
fn value_round_trip() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set(Psc(123));
    assert_eq!(ctrl.get::<Psc>(), Psc(123));
    ctrl.set(Arr(0xAB));
    assert_eq!(ctrl.get::<Arr>(), Arr(0xAB));
    assert_eq!(ctrl_raw(&io), 0x00AB_7B00);
    assert_eq!(u8::from(ctrl.get::<Psc>()), 123);
    assert_eq!(Psc::from(7), Psc(7));
}

#[test]
fn one_read_one_write() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set(Psc(1));
    assert_eq!((io.reads(), io.writes()), (1, 1));
    ctrl.clear(Flags::F0);
    assert_eq!((io.reads(), io.writes()), (2, 2));
    let _ = ctrl.get::<Psc>();
    assert_eq!((io.reads(), io.writes()), (3, 2));
}

#[test]
fn multi_field_operand() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set((Flags::F0, Speed::Fast, Psc(3)));
    assert_eq!(ctrl_raw(&io), 0x361);
    assert!(ctrl.is_set((Flags::F0, Speed::Fast)));
    assert!(!ctrl.is_set((Flags::F1, Speed::Fast)));
    ctrl.clear((Flags::F0, Psc(0)));
    assert_eq!(ctrl_raw(&io), 0x60);
    assert_eq!((io.reads(), io.writes()), (4, 2));
}

#[test]
fn is_set_requires_all_flags() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set(Flags::F0);
    assert!(ctrl.is_set(Flags::F0));
    assert!(!ctrl.is_set([Flags::F0, Flags::F1]));
    ctrl.set(Flags::F1);
    assert!(ctrl.is_set(Flags::F0 | Flags::F1));
}

#[test]
fn staged_round_trip() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    io.poke(tst_ctrl::ADDRESS, 0b001);
    let hold = ctrl.read();
    assert_eq!((io.reads(), io.writes()), (1, 0));
    let hold = hold.set(Flags::F2).set(Psc(7)).clear(Flags::F0).set(Speed::Turbo);
    assert_eq!((io.reads(), io.writes()), (1, 0));
    assert_eq!(ctrl_raw(&io), 0b001);
    assert_eq!(hold.get::<Psc>(), Psc(7));
    assert_eq!(hold.get::<Speed>(), Speed::Turbo);
    assert!(hold.is_set(Flags::F2));
    hold.write();
    assert_eq!((io.reads(), io.writes()), (1, 1));
    assert_eq!(ctrl_raw(&io), 0x744);
    hold.write();
    assert_eq!(io.writes(), 2);
    io.poke(tst_ctrl::ADDRESS, 0);
    assert_eq!(hold.raw(), 0x744);
    assert_eq!(hold.read().raw(), 0);
}

#[test]
fn staged_equals_eager() {
    let eager = Io::new(BASE);
    let staged = Io::new(BASE);
    for io in [&eager, &staged] {
        io.poke(tst_ctrl::ADDRESS, 0xA5A5_A5A5);
    }
    let reg = ctrl(&eager);
    reg.set(Flags::F1);
    reg.clear(Flags::F0);
    reg.set(Mode1::Off);
    reg.set(Psc(0x42));
    ctrl(&staged)
        .read()
        .set(Flags::F1)
        .clear(Flags::F0)
        .set(Mode1::Off)
        .set(Psc(0x42))
        .write();
    assert_eq!(ctrl_raw(&eager), ctrl_raw(&staged));
    assert_eq!((staged.reads(), staged.writes()), (1, 1));
}

#[test]
fn write_from_zero() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    io.poke(tst_ctrl::ADDRESS, 0xFFFF_FFFF);
    ctrl.write(|val| val.set(Flags::F1).set(Psc(9)));
    assert_eq!(ctrl_raw(&io), 0x902);
    assert_eq!((io.reads(), io.writes()), (0, 1));
    ctrl.new_val().set(Flags::F0).write();
    assert_eq!(ctrl_raw(&io), 0b1);
    assert_eq!((io.reads(), io.writes()), (0, 2));
}

#[test]
fn modify() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    io.poke(tst_ctrl::ADDRESS, 0xFF);
    ctrl.modify(|val| val.clear(Flags::F0).set(Psc(1)));
    assert_eq!(ctrl_raw(&io), 0x1FE);
    assert_eq!((io.reads(), io.writes()), (1, 1));
}

#[test]
fn clear_all() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    io.poke(tst_ctrl::ADDRESS, 0xFFFF_FFFF);
    ctrl.clear_all();
    assert_eq!(ctrl_raw(&io), 0);
    assert_eq!((io.reads(), io.writes()), (0, 1));
}

#[test]
fn read_only() {
    use tst_status::{Count, Ready};
    let io = Io::new(BASE);
    let status = unsafe { tst_status::Reg::new(&io) };
    io.poke(tst_status::ADDRESS, 0x2A01);
    assert!(status.is_set(Ready::Ready));
    assert_eq!(status.get::<Count>(), Count(0x2A));
    assert_eq!(status.read().get::<Count>(), Count(0x2A));
    assert_eq!(io.writes(), 0);
}

#[test]
fn write_only() {
    use tst_cmd::{Cmd, Code};
    let io = Io::new(BASE);
    let cmd = unsafe { tst_cmd::Reg::new(&io) };
    io.poke(tst_cmd::ADDRESS, 0xFFFF);
    cmd.set_wo([Cmd::Start, Cmd::Reset]);
    assert_eq!(io.peek(tst_cmd::ADDRESS), 0b1001);
    assert_eq!((io.reads(), io.writes()), (0, 1));
    cmd.set_wo((Cmd::Stop, Code(0xA)));
    assert_eq!(io.peek(tst_cmd::ADDRESS), 0xA02);
    cmd.write(|val| val.set(Cmd::Start));
    assert_eq!(io.peek(tst_cmd::ADDRESS), 0b1);
    assert_eq!((io.reads(), io.writes()), (0, 3));
}

#[test]
fn byte_register() {
    use tst_byte::{High, Low};
    let io = MemIo::<u8, 1>::new(tst_byte::ADDRESS);
    let byte = unsafe { tst_byte::Reg::new(&io) };
    byte.set(Low(5));
    byte.set(High(0xA));
    assert_eq!(io.peek(tst_byte::ADDRESS), 0xA5);
    assert_eq!(byte.get::<High>(), High(0xA));
}

#[test]
fn wide_register() {
    use tst_wide::{Low, Top};
    let io = MemIo::<u64, 1>::new(tst_wide::ADDRESS);
    let wide = unsafe { tst_wide::Reg::new(&io) };
    wide.set(Top::Msb);
    wide.set(Low(0xDEAD_BEEF));
    assert_eq!(io.peek(tst_wide::ADDRESS), 0x8000_0000_DEAD_BEEF);
    wide.clear(Top::Msb);
    assert_eq!(wide.get::<Low>(), Low(0xDEAD_BEEF));
    assert!(!wide.is_set(Top::Msb));
}

#[test]
fn debug() {
    let io = Io::new(BASE);
    let ctrl = ctrl(&io);
    ctrl.set((Flags::F0, Speed::Fast, Psc(3)));
    assert_eq!(format!("{:?}", ctrl), "TST CTRL(0x1000)");
    assert_eq!(format!("{:?}", ctrl.load_val()), "Val(0x361)");
    assert_eq!(format!("{:?}", ctrl.read()), "Hold { address: 0x1000, val: 0x361 }");
    assert_eq!(format!("{:?}", Flags::F0 | Flags::F2), "FlagSet(0b101)");
}

#[test]
fn interleaved_fields() {
    let io = IrqIo::new(0x3000);
    let irq = unsafe { tst_irq::Reg::new(&io) };
    assert_eq!(<tst_irq::IeField as RegField>::mask(), 0b1001);
    assert_eq!(<tst_irq::FaultField as RegField>::mask(), 0xC040);
    assert_eq!(<tst_irq::FaultField as RegField>::OFFSET, 6);
    assert_eq!(<tst_irq::Map as RegMap>::FIELDS[0], FieldSpan::from_mask("IE", 0b1001));
    assert_eq!(validate_map::<tst_irq::Map>(), Ok(()));
    irq.set((Ie::Rx | Ie::Tx, Prio(0b11)));
    assert_eq!(io.peek(0x3000), 0b1111);
    irq.clear(Ie::Tx);
    assert_eq!(io.peek(0x3000), 0b0111);
    irq.set([Fault::Frame, Fault::Overrun]);
    assert_eq!(io.peek(0x3000), 0xC007);
    irq.clear(Prio(0));
    assert_eq!(io.peek(0x3000), 0xC001);
    assert_eq!(irq.get::<Prio>(), Prio(0));
    assert!(irq.is_set([Fault::Frame, Fault::Overrun]));
    assert!(!irq.is_set(Fault::Parity));
    irq.read().set(Fault::Parity).clear(Ie::Rx).write();
    assert_eq!(io.peek(0x3000), 0xC040);
}

#[test]
fn partial_mode() {
    let io = IrqIo::new(0x3000);
    let irq = unsafe { tst_irq::Reg::new(&io) };
    irq.set(Src::Pll);
    assert_eq!(io.peek(0x3000), 0x20);
    assert_eq!(irq.get::<Src>(), Src::Pll);
    io.poke(0x3000, 0x3F);
    assert_eq!(irq.get::<Src>(), Src::Reserved(3));
    irq.set(Src::Hse);
    assert_eq!(io.peek(0x3000), 0x1F);
    irq.set(Src::Reserved(3));
    assert_eq!(io.peek(0x3000), 0x3F);
    assert!(irq.is_set(Src::Reserved(3)));
}
