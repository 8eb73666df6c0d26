//! Basic16 CPU core with per-phase execution.

use sim_core::{Cpu, Observable, Ticks, Value};

use crate::alu::{self, AluMode};
use crate::error::{CpuError, MemoryError};
use crate::flags::{self, Psw};
use crate::isa::{self, InstructionType};
use crate::memory::{Memory, MemoryMode, RESULT_ADDR};
use crate::program::Program;
use crate::registers::{PC_REG, PSW_REG, REGISTER_COUNT, Registers, SP_REG};
use crate::snapshot::{MemoryCell, Snapshot};

/// One step of the instruction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Phase {
    /// PC onto the A bus, passed through to the source bus.
    #[default]
    FetchInst0,
    /// Read the instruction word; compute PC+1.
    FetchInst1,
    /// Decode, commit PC+1, stage the first bus operand.
    FetchOperand0,
    /// LD/ST only: latch the address, LD reads memory.
    FetchOperand1,
    /// Drive the ALU.
    ExecInst,
    /// Commit the source bus to a register or memory.
    WriteBack,
}

impl Phase {
    /// Every phase, in cycle order.
    pub const ALL: [Phase; 6] = [
        Phase::FetchInst0,
        Phase::FetchInst1,
        Phase::FetchOperand0,
        Phase::FetchOperand1,
        Phase::ExecInst,
        Phase::WriteBack,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::FetchInst0 => "FETCH_INST_0",
            Phase::FetchInst1 => "FETCH_INST_1",
            Phase::FetchOperand0 => "FETCH_OPERAND_0",
            Phase::FetchOperand1 => "FETCH_OPERAND_1",
            Phase::ExecInst => "EXEC_INST",
            Phase::WriteBack => "WRITE_BACK",
        }
    }
}

/// Register index from an operand field. Decoded fields are already 3 bits.
const fn reg_index(operand: u16) -> usize {
    (operand & 0b111) as usize
}

/// Basic16 CPU.
///
/// The CPU owns its register file, its memory and every bus latch. The only
/// way to move it forward is [`Basic16::advance`] (or `Cpu::tick`), which
/// performs exactly one phase.
#[derive(Debug, Clone)]
pub struct Basic16 {
    // === Architectural state ===
    regs: [u16; REGISTER_COUNT],
    memory: Memory,

    // === Latches and buses ===
    /// Memory address register.
    mar: u16,
    /// Memory data register.
    mdr: u16,
    /// Instruction register.
    ir: u16,
    /// Holds the second operand between operand fetch and execute.
    reg_b: u16,
    /// ALU output.
    s_bus: u16,
    /// ALU A input.
    a_bus: u16,
    /// ALU B input.
    b_bus: u16,
    alu_mode: AluMode,

    // === Sequencing ===
    phase: Phase,
    /// Instruction being executed. Before the first decode this is the
    /// decoding of an all-zero IR.
    program: Program,
    halted: bool,

    // === Counters ===
    clock: Ticks,
    instructions: u64,
}

impl Default for Basic16 {
    fn default() -> Self {
        Self::new()
    }
}

impl Basic16 {
    /// Create a CPU with zeroed registers and memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: [0; REGISTER_COUNT],
            memory: Memory::new(),
            mar: 0,
            mdr: 0,
            ir: 0,
            reg_b: 0,
            s_bus: 0,
            a_bus: 0,
            b_bus: 0,
            alu_mode: AluMode::Nop,
            phase: Phase::FetchInst0,
            program: Program::new(isa::by_type(InstructionType::Mov), 0, 0),
            halted: false,
            clock: Ticks::ZERO,
            instructions: 0,
        }
    }

    /// Create a CPU with `image` loaded at address 0.
    pub fn with_program(image: &[u16]) -> Result<Self, MemoryError> {
        let mut cpu = Self::new();
        cpu.memory.load(0, image)?;
        Ok(cpu)
    }

    #[must_use]
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut Memory {
        &mut self.memory
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Phases executed since creation or reset.
    #[must_use]
    pub const fn clock(&self) -> Ticks {
        self.clock
    }

    /// Instructions decoded since creation or reset.
    #[must_use]
    pub const fn instructions(&self) -> u64 {
        self.instructions
    }

    /// The instruction currently in flight, once one has been decoded.
    #[must_use]
    pub fn current_program(&self) -> Option<&Program> {
        (self.instructions > 0).then_some(&self.program)
    }

    #[must_use]
    pub const fn alu_mode(&self) -> AluMode {
        self.alu_mode
    }

    /// Overwrite a register.
    ///
    /// Only available in test builds.
    #[cfg(feature = "test-utils")]
    pub fn set_register(&mut self, code: usize, value: u16) {
        self.regs[reg_index(code as u16)] = value;
    }

    /// Run the ALU over the current buses onto the source bus.
    fn alu(&mut self) {
        let mut psw = Psw::new(&mut self.regs[PSW_REG]);
        self.s_bus = alu::calc(self.alu_mode, self.a_bus, self.b_bus, &mut psw);
    }

    /// One bus cycle between MAR and MDR.
    fn bus_access(&mut self, mode: MemoryMode) -> Result<(), MemoryError> {
        self.memory.mode = mode;
        self.memory.access(self.mar, &mut self.mdr)
    }

    /// Perform one clock phase.
    ///
    /// Returns `Ok(true)` once HLT has executed; after that the CPU is
    /// frozen and further calls return `Ok(true)` without doing anything.
    ///
    /// A fault leaves the CPU in the phase that faulted, with registers and
    /// memory exactly as they were before the call.
    pub fn advance(&mut self) -> Result<bool, CpuError> {
        if self.halted {
            return Ok(true);
        }

        let next = match self.phase {
            Phase::FetchInst0 => self.fetch_inst_0(),
            Phase::FetchInst1 => self.fetch_inst_1()?,
            Phase::FetchOperand0 => self.fetch_operand_0()?,
            Phase::FetchOperand1 => self.fetch_operand_1()?,
            Phase::ExecInst => self.exec_inst(),
            Phase::WriteBack => self.write_back()?,
        };
        log::trace!("{} -> {}", self.phase.name(), next.name());

        self.phase = next;
        self.clock += Ticks::new(1);
        Ok(self.halted)
    }

    fn fetch_inst_0(&mut self) -> Phase {
        self.a_bus = self.regs[PC_REG];
        self.alu_mode = AluMode::Nop;
        self.alu();
        Phase::FetchInst1
    }

    fn fetch_inst_1(&mut self) -> Result<Phase, CpuError> {
        self.mar = self.s_bus;
        self.bus_access(MemoryMode::Read)?;
        self.alu_mode = AluMode::Inc;
        self.alu();
        Ok(Phase::FetchOperand0)
    }

    fn fetch_operand_0(&mut self) -> Result<Phase, CpuError> {
        let program = Program::decode(self.mdr).map_err(|source| CpuError::Decode {
            pc: self.regs[PC_REG],
            source,
        })?;
        log::debug!(
            "{:#06X}: {} {:#X} {:#X}",
            self.regs[PC_REG],
            program.inst.mnemonic,
            program.first_operand,
            program.second_operand
        );

        self.ir = self.mdr;
        self.program = program;
        self.instructions += 1;
        // PC+1 lands now, so a jump's write-back later overrides it.
        self.regs[PC_REG] = self.s_bus;

        let next = match program.inst.kind {
            InstructionType::Mov
            | InstructionType::Add
            | InstructionType::Sub
            | InstructionType::And
            | InstructionType::Or
            | InstructionType::Cmp => {
                self.a_bus = self.regs[program.second_register()];
                Phase::ExecInst
            }
            InstructionType::Sl | InstructionType::Sr => {
                self.a_bus = self.regs[reg_index(program.first_operand)];
                Phase::ExecInst
            }
            InstructionType::Ld | InstructionType::St => {
                self.a_bus = program.second_operand;
                Phase::FetchOperand1
            }
            InstructionType::Ldl
            | InstructionType::Ldh
            | InstructionType::Je
            | InstructionType::Jmp
            | InstructionType::Hlt => Phase::ExecInst,
        };
        self.alu_mode = AluMode::Nop;
        self.alu();
        Ok(next)
    }

    fn fetch_operand_1(&mut self) -> Result<Phase, CpuError> {
        self.mar = self.s_bus;
        if self.program.inst.kind == InstructionType::Ld {
            self.bus_access(MemoryMode::Read)?;
        }
        self.alu_mode = AluMode::Nop;
        self.alu();
        Ok(Phase::ExecInst)
    }

    /// Latch the staged second operand onto B and the destination onto A.
    fn stage_binary(&mut self, mode: AluMode) {
        self.reg_b = self.s_bus;
        self.b_bus = self.reg_b;
        self.a_bus = self.regs[reg_index(self.program.first_operand)];
        self.alu_mode = mode;
    }

    fn exec_inst(&mut self) -> Phase {
        match self.program.inst.kind {
            InstructionType::Hlt => {
                self.halted = true;
                log::info!(
                    "halted after {} instructions ({} phases)",
                    self.instructions,
                    self.clock.get() + 1
                );
                return Phase::WriteBack;
            }
            // A still carries the source register from operand fetch.
            InstructionType::Mov => self.alu_mode = AluMode::Nop,
            InstructionType::Add => self.stage_binary(AluMode::Add),
            InstructionType::Sub => self.stage_binary(AluMode::Sub),
            InstructionType::And => self.stage_binary(AluMode::And),
            InstructionType::Or => self.stage_binary(AluMode::Or),
            InstructionType::Cmp => self.stage_binary(AluMode::Cmp),
            InstructionType::Sl => self.alu_mode = AluMode::ShiftL,
            InstructionType::Sr => self.alu_mode = AluMode::ShiftR,
            InstructionType::Ldl => {
                self.a_bus = self.program.second_operand;
                self.alu_mode = AluMode::Nop;
            }
            InstructionType::Ldh => {
                self.a_bus = self.program.second_operand << 8;
                self.alu_mode = AluMode::Nop;
            }
            InstructionType::Je | InstructionType::Jmp => {
                self.a_bus = self.program.second_operand;
                self.program.first_operand = PC_REG as u16;
                self.alu_mode = AluMode::Nop;
            }
            InstructionType::Ld => {
                self.a_bus = self.mdr;
                self.alu_mode = AluMode::Nop;
            }
            InstructionType::St => {
                self.a_bus = self.regs[reg_index(self.program.first_operand)];
                self.alu_mode = AluMode::Nop;
            }
        }
        self.alu();
        Phase::WriteBack
    }

    fn write_back(&mut self) -> Result<Phase, CpuError> {
        let dest = reg_index(self.program.first_operand);
        match self.program.inst.kind {
            InstructionType::St => {
                self.mdr = self.s_bus;
                self.bus_access(MemoryMode::Write)?;
            }
            // LDL and LDH each fill one byte, so merge instead of overwrite.
            InstructionType::Ldl | InstructionType::Ldh => self.regs[dest] |= self.s_bus,
            InstructionType::Je => {
                if flags::zero(self.regs[PSW_REG]) != 0 {
                    self.regs[dest] = self.s_bus;
                }
            }
            InstructionType::Cmp | InstructionType::Hlt => {}
            InstructionType::Mov
            | InstructionType::Add
            | InstructionType::Sub
            | InstructionType::And
            | InstructionType::Or
            | InstructionType::Sl
            | InstructionType::Sr
            | InstructionType::Jmp
            | InstructionType::Ld => self.regs[dest] = self.s_bus,
        }
        Ok(Phase::FetchInst0)
    }

    /// Capture the state a debugger shows after each phase.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let pc = self.regs[PC_REG];
        let start = pc.saturating_sub(2);
        let window = (start..start.saturating_add(5))
            .filter_map(|address| {
                self.memory
                    .peek(address)
                    .map(|value| MemoryCell { address, value })
            })
            .collect();
        Snapshot {
            clock: self.clock,
            instructions: self.instructions,
            phase: self.phase,
            program: self.current_program().copied(),
            registers: Registers(self.regs),
            halted: self.halted,
            window,
            result: MemoryCell {
                address: RESULT_ADDR,
                value: self.memory.peek(RESULT_ADDR).unwrap_or_default(),
            },
        }
    }
}

impl Cpu for Basic16 {
    type Registers = Registers;
    type Error = CpuError;

    fn tick(&mut self) -> Result<bool, CpuError> {
        self.advance()
    }

    fn pc(&self) -> u16 {
        self.regs[PC_REG]
    }

    fn registers(&self) -> Registers {
        Registers(self.regs)
    }

    fn is_halted(&self) -> bool {
        self.halted
    }

    fn reset(&mut self) {
        let memory = std::mem::take(&mut self.memory);
        *self = Self {
            memory,
            ..Self::new()
        };
    }
}

/// All query paths supported by Basic16.
const BASIC16_QUERY_PATHS: &[&str] = &[
    // Registers
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7",
    // Register aliases
    "psw", "sp", "pc",
    // Flags
    "flags.n", "flags.z",
    // Latches and buses
    "ir", "mar", "mdr", "reg_b", "s_bus", "a_bus", "b_bus",
    // Sequencing
    "phase", "opcode", "halted", "clock", "instructions",
    // Conventional output slot
    "result",
];

impl Observable for Basic16 {
    fn query(&self, path: &str) -> Option<Value> {
        if let Some(reg) = isa::register_by_name(path) {
            return Some(self.regs[usize::from(reg.code)].into());
        }
        match path {
            "psw" => Some(self.regs[PSW_REG].into()),
            "sp" => Some(self.regs[SP_REG].into()),
            "pc" => Some(self.regs[PC_REG].into()),

            "flags.n" => Some((flags::negative(self.regs[PSW_REG]) != 0).into()),
            "flags.z" => Some((flags::zero(self.regs[PSW_REG]) != 0).into()),

            "ir" => Some(self.ir.into()),
            "mar" => Some(self.mar.into()),
            "mdr" => Some(self.mdr.into()),
            "reg_b" => Some(self.reg_b.into()),
            "s_bus" => Some(self.s_bus.into()),
            "a_bus" => Some(self.a_bus.into()),
            "b_bus" => Some(self.b_bus.into()),

            "phase" => Some(self.phase.name().into()),
            "opcode" => Some(self.program.inst.opcode.into()),
            "halted" => Some(self.halted.into()),
            "clock" => Some(self.clock.get().into()),
            "instructions" => Some(self.instructions.into()),

            "result" => self.memory.peek(RESULT_ADDR).map(Value::from),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        BASIC16_QUERY_PATHS
    }
}
