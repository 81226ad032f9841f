//! The configuration resolver.
//!
//! Reads the `STRESSKIT_*` environment at build time, validates every knob
//! against the domain catalogs, and emits one `<family>_variant.rs` per
//! workload family into `OUT_DIR`. Each generated file pins the five slot
//! types (unselected positions become the shared no-op) and the family's
//! parameters as constants, so the binaries monomorphize their hot loops
//! with zero runtime dispatch.
//!
//! Any out-of-catalog identifier or invalid size aborts the build here,
//! before a workload binary exists to run.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use stresskit_domain::{
    BusConfig, BusOp, CacheConfig, ChaseConfig, ChaseOp, ChaseTopology, ElemWidth, FileOp,
    IterationCount, MemConfig, PageOp, PipeOp, PipelineConfig, ProbeOp, SlotList, SlotOp,
    SyscallConfig, WcetConfig, WcetKernel,
};

fn main() {
    if let Err(err) = generate_all() {
        eprintln!("error: stresskit configuration rejected: {err:#}");
        std::process::exit(1);
    }
}

fn generate_all() -> Result<()> {
    let out_dir = PathBuf::from(env::var("OUT_DIR").context("OUT_DIR not set")?);

    write_variant(&out_dir, "bus_variant.rs", &bus_variant()?)?;
    write_variant(&out_dir, "cache_variant.rs", &cache_variant()?)?;
    write_variant(&out_dir, "chase_variant.rs", &chase_variant()?)?;
    write_variant(&out_dir, "pipeline_variant.rs", &pipeline_variant()?)?;
    write_variant(&out_dir, "syscall_variant.rs", &syscall_variant()?)?;
    write_variant(&out_dir, "mem_variant.rs", &mem_variant()?)?;
    write_variant(&out_dir, "wcet_variant.rs", &wcet_variant()?)?;
    Ok(())
}

fn write_variant(out_dir: &Path, file: &str, contents: &str) -> Result<()> {
    let path = out_dir.join(file);
    fs::write(&path, contents).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

// -----------------------------------------------------------------------------
// Environment access
// -----------------------------------------------------------------------------

/// Read one knob, registering it for rebuild-on-change. Empty values count
/// as unset so a matrix entry can explicitly fall back to the default.
fn knob(name: &str) -> Option<String> {
    println!("cargo:rerun-if-env-changed={name}");
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parsed<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match knob(name) {
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(err) => bail!("{name}={raw}: {err}"),
        },
        None => Ok(None),
    }
}

fn slots_knob<O: SlotOp>(name: &str) -> Result<Option<SlotList<O>>> {
    match knob(name) {
        Some(raw) => {
            let list = SlotList::parse(&raw).map_err(|err| anyhow::anyhow!("{name}: {err}"))?;
            Ok(Some(list))
        }
        None => Ok(None),
    }
}

// -----------------------------------------------------------------------------
// Rendering
// -----------------------------------------------------------------------------

const NOP: &str = "stresskit_core::slots::Nop";
const HEADER: &str = "// Generated by the stresskit-cli build script. Do not edit.\n";

fn slot_aliases<O: SlotOp>(slots: &SlotList<O>, ty: fn(O) -> &'static str) -> String {
    let mut out = String::new();
    for (i, slot) in slots.as_array().iter().enumerate() {
        let path = slot.map(ty).unwrap_or(NOP);
        let _ = writeln!(out, "pub type Slot{} = {};", i + 1, path);
    }
    out
}

fn ops_expr<O: SlotOp>(slots: &SlotList<O>, path: fn(O) -> &'static str) -> String {
    let ops: Vec<&str> = slots.as_array().iter().flatten().map(|&op| path(op)).collect();
    format!("&[{}]", ops.join(", "))
}

fn iterations_expr(count: IterationCount) -> String {
    match count.bound() {
        Some(n) => format!("Some({n}u64)"),
        None => "None".to_string(),
    }
}

// -----------------------------------------------------------------------------
// Per-family type and variant paths
// -----------------------------------------------------------------------------

fn bus_slot_type(op: BusOp) -> &'static str {
    match op {
        BusOp::CopyAToB => "stresskit_core::bus::CopyAToB",
        BusOp::CopyBToA => "stresskit_core::bus::CopyBToA",
        BusOp::ComputeInPlaceA => "stresskit_core::bus::ComputeInPlaceA",
        BusOp::ComputeAToB => "stresskit_core::bus::ComputeAToB",
        BusOp::ComputeBToA => "stresskit_core::bus::ComputeBToA",
    }
}

fn bus_op_path(op: BusOp) -> &'static str {
    match op {
        BusOp::CopyAToB => "stresskit_domain::BusOp::CopyAToB",
        BusOp::CopyBToA => "stresskit_domain::BusOp::CopyBToA",
        BusOp::ComputeInPlaceA => "stresskit_domain::BusOp::ComputeInPlaceA",
        BusOp::ComputeAToB => "stresskit_domain::BusOp::ComputeAToB",
        BusOp::ComputeBToA => "stresskit_domain::BusOp::ComputeBToA",
    }
}

fn probe_slot_type(op: ProbeOp) -> &'static str {
    match op {
        ProbeOp::Store => "stresskit_core::cache::Store",
        ProbeOp::Load => "stresskit_core::cache::Load",
    }
}

fn probe_op_path(op: ProbeOp) -> &'static str {
    match op {
        ProbeOp::Store => "stresskit_domain::ProbeOp::Store",
        ProbeOp::Load => "stresskit_domain::ProbeOp::Load",
    }
}

fn chase_slot_type(op: ChaseOp) -> &'static str {
    match op {
        ChaseOp::Store => "stresskit_core::chase::Store",
        ChaseOp::Load => "stresskit_core::chase::Load",
    }
}

fn chase_op_path(op: ChaseOp) -> &'static str {
    match op {
        ChaseOp::Store => "stresskit_domain::ChaseOp::Store",
        ChaseOp::Load => "stresskit_domain::ChaseOp::Load",
    }
}

fn pipe_slot_type(op: PipeOp) -> &'static str {
    match op {
        PipeOp::Independent => "stresskit_core::pipeline::Independent",
        PipeOp::Dependent => "stresskit_core::pipeline::Dependent",
    }
}

fn file_slot_type(op: FileOp) -> &'static str {
    match op {
        FileOp::Seek => "stresskit_core::syscall::Seeker",
        FileOp::Read => "stresskit_core::syscall::Reader",
        FileOp::Write => "stresskit_core::syscall::Writer",
        FileOp::Reopen => "stresskit_core::syscall::Reopen",
    }
}

fn file_op_path(op: FileOp) -> &'static str {
    match op {
        FileOp::Seek => "stresskit_domain::FileOp::Seek",
        FileOp::Read => "stresskit_domain::FileOp::Read",
        FileOp::Write => "stresskit_domain::FileOp::Write",
        FileOp::Reopen => "stresskit_domain::FileOp::Reopen",
    }
}

fn page_slot_type(op: PageOp) -> &'static str {
    match op {
        PageOp::SetPage => "stresskit_core::mem::SetPage",
        PageOp::SetHalfPage => "stresskit_core::mem::SetHalfPage",
        PageOp::SetHalfOffset => "stresskit_core::mem::SetHalfOffset",
    }
}

fn page_op_path(op: PageOp) -> &'static str {
    match op {
        PageOp::SetPage => "stresskit_domain::PageOp::SetPage",
        PageOp::SetHalfPage => "stresskit_domain::PageOp::SetHalfPage",
        PageOp::SetHalfOffset => "stresskit_domain::PageOp::SetHalfOffset",
    }
}

fn kernel_path(kernel: WcetKernel) -> &'static str {
    match kernel {
        WcetKernel::Fibcall => "stresskit_domain::WcetKernel::Fibcall",
        WcetKernel::Bsort => "stresskit_domain::WcetKernel::Bsort",
        WcetKernel::Insertsort => "stresskit_domain::WcetKernel::Insertsort",
        WcetKernel::Matmult => "stresskit_domain::WcetKernel::Matmult",
        WcetKernel::Crc => "stresskit_domain::WcetKernel::Crc",
        WcetKernel::Prime => "stresskit_domain::WcetKernel::Prime",
        WcetKernel::VectorAdd => "stresskit_domain::WcetKernel::VectorAdd",
    }
}

fn width_path(width: ElemWidth) -> &'static str {
    match width {
        ElemWidth::U8 => "stresskit_domain::ElemWidth::U8",
        ElemWidth::I8 => "stresskit_domain::ElemWidth::I8",
        ElemWidth::U16 => "stresskit_domain::ElemWidth::U16",
        ElemWidth::I16 => "stresskit_domain::ElemWidth::I16",
        ElemWidth::U32 => "stresskit_domain::ElemWidth::U32",
        ElemWidth::I32 => "stresskit_domain::ElemWidth::I32",
        ElemWidth::U64 => "stresskit_domain::ElemWidth::U64",
        ElemWidth::I64 => "stresskit_domain::ElemWidth::I64",
    }
}

fn topology_path(topology: ChaseTopology) -> &'static str {
    match topology {
        ChaseTopology::Strided => "stresskit_domain::ChaseTopology::Strided",
        ChaseTopology::Forward => "stresskit_domain::ChaseTopology::Forward",
    }
}

// -----------------------------------------------------------------------------
// Family resolvers
// -----------------------------------------------------------------------------

fn bus_variant() -> Result<String> {
    let mut config = BusConfig::default();
    if let Some(slots) = slots_knob::<BusOp>("STRESSKIT_BUS_SLOTS")? {
        config.slots = slots;
    }
    if let Some(size_mb) = parsed::<usize>("STRESSKIT_BUS_SIZE_MB")? {
        config.size_mb = size_mb;
    }
    if let Some(width) = parsed::<ElemWidth>("STRESSKIT_BUS_WIDTH")? {
        config.width = width;
    }
    if let Some(iterations) = parsed::<IterationCount>("STRESSKIT_BUS_ITERATIONS")? {
        config.iterations = iterations;
    }
    config.validate().context("bus configuration")?;

    let mut out = String::from(HEADER);
    out.push_str(&slot_aliases(&config.slots, bus_slot_type));
    let _ = writeln!(out, "pub type Elem = {};", config.width.rust_type());
    let _ = writeln!(
        out,
        "pub const ITERATIONS: Option<u64> = {};",
        iterations_expr(config.iterations)
    );
    let _ = writeln!(
        out,
        "pub fn config() -> stresskit_domain::BusConfig {{\n    \
         stresskit_domain::BusConfig {{\n        \
         size_mb: {size_mb}usize,\n        \
         width: {width},\n        \
         slots: stresskit_domain::SlotList::of({ops}).unwrap_or_default(),\n        \
         iterations: {iters},\n    }}\n}}",
        size_mb = config.size_mb,
        width = width_path(config.width),
        ops = ops_expr(&config.slots, bus_op_path),
        iters = iteration_count_expr(config.iterations),
    );
    Ok(out)
}

fn cache_variant() -> Result<String> {
    let mut config = CacheConfig::default();
    if let Some(slots) = slots_knob::<ProbeOp>("STRESSKIT_CACHE_SLOTS")? {
        config.slots = slots;
    }
    if let Some(size_kb) = parsed::<usize>("STRESSKIT_CACHE_SIZE_KB")? {
        config.size_bytes = size_kb * 1024;
    }
    if let Some(size_bytes) = parsed::<usize>("STRESSKIT_CACHE_SIZE_BYTES")? {
        config.size_bytes = size_bytes;
    }
    if let Some(stride) = parsed::<usize>("STRESSKIT_CACHE_STRIDE_BYTES")? {
        config.stride_bytes = stride;
    }
    if let Some(assoc) = parsed::<usize>("STRESSKIT_CACHE_ASSOC")? {
        config.associativity = assoc;
    }
    if let Some(passes) = parsed::<IterationCount>("STRESSKIT_CACHE_PASSES")? {
        config.passes = passes;
    }
    config.validate().context("cache configuration")?;

    let mut out = String::from(HEADER);
    out.push_str(&slot_aliases(&config.slots, probe_slot_type));
    let _ = writeln!(
        out,
        "pub const PASSES: Option<u64> = {};",
        iterations_expr(config.passes)
    );
    let _ = writeln!(
        out,
        "pub fn config() -> stresskit_domain::CacheConfig {{\n    \
         stresskit_domain::CacheConfig {{\n        \
         size_bytes: {size}usize,\n        \
         stride_bytes: {stride}usize,\n        \
         associativity: {assoc}usize,\n        \
         slots: stresskit_domain::SlotList::of({ops}).unwrap_or_default(),\n        \
         passes: {passes},\n    }}\n}}",
        size = config.size_bytes,
        stride = config.stride_bytes,
        assoc = config.associativity,
        ops = ops_expr(&config.slots, probe_op_path),
        passes = iteration_count_expr(config.passes),
    );
    Ok(out)
}

fn chase_variant() -> Result<String> {
    let mut config = ChaseConfig::default();
    if let Some(slots) = slots_knob::<ChaseOp>("STRESSKIT_CHASE_SLOTS")? {
        config.slots = slots;
    }
    if let Some(elements) = parsed::<usize>("STRESSKIT_CHASE_ELEMENTS")? {
        config.elements = elements;
    }
    if let Some(stride) = parsed::<usize>("STRESSKIT_CHASE_STRIDE")? {
        config.stride = stride;
    }
    if let Some(topology) = parsed::<ChaseTopology>("STRESSKIT_CHASE_TOPOLOGY")? {
        config.topology = topology;
    }
    if let Some(steps) = parsed::<IterationCount>("STRESSKIT_CHASE_STEPS")? {
        config.steps = steps;
    }
    config.validate().context("pointer-chase configuration")?;

    let mut out = String::from(HEADER);
    out.push_str(&slot_aliases(&config.slots, chase_slot_type));
    let _ = writeln!(out, "pub const ELEMENTS: usize = {};", config.elements);
    let _ = writeln!(out, "pub const STRIDE: usize = {};", config.stride);
    let _ = writeln!(
        out,
        "pub const STEPS: Option<u64> = {};",
        iterations_expr(config.steps)
    );
    let _ = writeln!(
        out,
        "pub fn config() -> stresskit_domain::ChaseConfig {{\n    \
         stresskit_domain::ChaseConfig {{\n        \
         elements: {elements}usize,\n        \
         stride: {stride}usize,\n        \
         topology: {topology},\n        \
         slots: stresskit_domain::SlotList::of({ops}).unwrap_or_default(),\n        \
         steps: {steps},\n    }}\n}}",
        elements = config.elements,
        stride = config.stride,
        topology = topology_path(config.topology),
        ops = ops_expr(&config.slots, chase_op_path),
        steps = iteration_count_expr(config.steps),
    );
    Ok(out)
}

fn pipeline_variant() -> Result<String> {
    let mut config = PipelineConfig::default();
    if let Some(slots) = slots_knob::<PipeOp>("STRESSKIT_PIPE_SLOTS")? {
        config.slots = slots;
    }
    if let Some(iterations) = parsed::<IterationCount>("STRESSKIT_PIPE_ITERATIONS")? {
        config.iterations = iterations;
    }
    if let Some(raw) = knob("STRESSKIT_PIPE_COEFFS") {
        config.coeffs = parse_coeffs(&raw)?;
    }
    config.validate().context("pipeline configuration")?;

    let coeffs: Vec<String> = config.coeffs.iter().map(|c| format!("{c:?}f64")).collect();

    let mut out = String::from(HEADER);
    out.push_str(&slot_aliases(&config.slots, pipe_slot_type));
    let _ = writeln!(out, "pub const COEFFS: [f64; 8] = [{}];", coeffs.join(", "));
    let _ = writeln!(
        out,
        "pub const ITERATIONS: Option<u64> = {};",
        iterations_expr(config.iterations)
    );
    Ok(out)
}

fn syscall_variant() -> Result<String> {
    let mut config = SyscallConfig::default();
    if let Some(slots) = slots_knob::<FileOp>("STRESSKIT_SYSCALL_SLOTS")? {
        config.slots = slots;
    }
    if let Some(file) = knob("STRESSKIT_SYSCALL_FILE") {
        config.file_name = file;
    }
    if let Some(iterations) = parsed::<IterationCount>("STRESSKIT_SYSCALL_ITERATIONS")? {
        config.iterations = iterations;
    }
    config.validate().context("syscall configuration")?;

    let mut out = String::from(HEADER);
    out.push_str(&slot_aliases(&config.slots, file_slot_type));
    let _ = writeln!(
        out,
        "pub const ITERATIONS: Option<u64> = {};",
        iterations_expr(config.iterations)
    );
    let _ = writeln!(
        out,
        "pub fn config() -> stresskit_domain::SyscallConfig {{\n    \
         stresskit_domain::SyscallConfig {{\n        \
         file_name: {file:?}.to_string(),\n        \
         slots: stresskit_domain::SlotList::of({ops}).unwrap_or_default(),\n        \
         iterations: {iters},\n    }}\n}}",
        file = config.file_name,
        ops = ops_expr(&config.slots, file_op_path),
        iters = iteration_count_expr(config.iterations),
    );
    Ok(out)
}

fn mem_variant() -> Result<String> {
    let mut config = MemConfig::default();
    if let Some(slots) = slots_knob::<PageOp>("STRESSKIT_MEM_SLOTS")? {
        config.slots = slots;
    }
    if let Some(size_mb) = parsed::<usize>("STRESSKIT_MEM_SIZE_MB")? {
        config.size_mb = size_mb;
    }
    if let Some(page) = parsed::<usize>("STRESSKIT_MEM_PAGE_BYTES")? {
        config.page_bytes = page;
    }
    if let Some(iterations) = parsed::<IterationCount>("STRESSKIT_MEM_ITERATIONS")? {
        config.iterations = iterations;
    }
    config.validate().context("mem configuration")?;

    let mut out = String::from(HEADER);
    out.push_str(&slot_aliases(&config.slots, page_slot_type));
    let _ = writeln!(
        out,
        "pub const ITERATIONS: Option<u64> = {};",
        iterations_expr(config.iterations)
    );
    let _ = writeln!(
        out,
        "pub fn config() -> stresskit_domain::MemConfig {{\n    \
         stresskit_domain::MemConfig {{\n        \
         size_mb: {size_mb}usize,\n        \
         page_bytes: {page}usize,\n        \
         slots: stresskit_domain::SlotList::of({ops}).unwrap_or_default(),\n        \
         iterations: {iters},\n    }}\n}}",
        size_mb = config.size_mb,
        page = config.page_bytes,
        ops = ops_expr(&config.slots, page_op_path),
        iters = iteration_count_expr(config.iterations),
    );
    Ok(out)
}

fn wcet_variant() -> Result<String> {
    let mut config = WcetConfig::default();
    if let Some(kernel) = parsed::<WcetKernel>("STRESSKIT_WCET_KERNEL")? {
        config.kernel = kernel;
    }
    if let Some(count) = parsed::<IterationCount>("STRESSKIT_WCET_ITERATIONS")? {
        match count {
            IterationCount::Finite(n) => config.default_iterations = n,
            IterationCount::Infinite => config.infinite = true,
        }
    }
    config.validate().context("wcet configuration")?;

    let mut out = String::from(HEADER);
    let _ = writeln!(
        out,
        "pub const KERNEL: stresskit_domain::WcetKernel = {};",
        kernel_path(config.kernel)
    );
    let _ = writeln!(
        out,
        "pub const DEFAULT_ITERATIONS: u64 = {};",
        config.default_iterations
    );
    let _ = writeln!(out, "pub const INFINITE: bool = {};", config.infinite);
    Ok(out)
}

fn iteration_count_expr(count: IterationCount) -> String {
    match count {
        IterationCount::Finite(n) => {
            format!("stresskit_domain::IterationCount::Finite({n}u64)")
        }
        IterationCount::Infinite => "stresskit_domain::IterationCount::Infinite".to_string(),
    }
}

fn parse_coeffs(raw: &str) -> Result<[f64; 8]> {
    let values = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("STRESSKIT_PIPE_COEFFS: '{part}' is not a float"))
        })
        .collect::<Result<Vec<f64>>>()?;
    let coeffs: [f64; 8] = values.try_into().map_err(|v: Vec<f64>| {
        anyhow::anyhow!("STRESSKIT_PIPE_COEFFS: expected 8 values, got {}", v.len())
    })?;
    Ok(coeffs)
}
