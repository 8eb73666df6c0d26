//! Tokens to programs.
//!
//! Assembly takes two passes over the token stream. The first records every
//! `name:` label against the index of the next instruction; the second turns
//! each instruction line into a [`Program`], resolving operands against the
//! label table and register names.
//!
//! Operands are placed the way the CPU reads them: a register given to a
//! single-operand instruction lands in bits 10-8, and a register in the
//! second position of a double-operand instruction lands in bits 7-5.

use std::collections::BTreeMap;

use cpu_basic16::Program;
use cpu_basic16::isa::{self, Instruction, OperandType};

use crate::error::AsmError;
use crate::lexer::{Token, TokenKind};

/// Label name to instruction index.
pub type LabelTable = BTreeMap<String, usize>;

/// Widest value for a register field.
const REGISTER_MAX: u16 = 0b111;
/// Widest value for the 8-bit immediate/target field.
const BYTE_MAX: u16 = 0xFF;

/// One non-blank source line with its label split off.
struct Line<'a> {
    number: usize,
    label: Option<&'a Token>,
    body: &'a [Token],
}

fn lines(tokens: &[Token]) -> impl Iterator<Item = Line<'_>> {
    tokens
        .split(|t| t.kind == TokenKind::Eol)
        .filter_map(|line| {
            let number = line.first()?.line;
            Some(match line {
                [name, colon, body @ ..]
                    if name.kind == TokenKind::Ident && colon.kind == TokenKind::Colon =>
                {
                    Line {
                        number,
                        label: Some(name),
                        body,
                    }
                }
                body => Line {
                    number,
                    label: None,
                    body,
                },
            })
        })
}

/// First pass: collect label definitions.
pub fn collect_labels(tokens: &[Token]) -> Result<LabelTable, AsmError> {
    let mut labels = LabelTable::new();
    let mut index = 0;
    for line in lines(tokens) {
        if let Some(name) = line.label {
            if labels.insert(name.text.clone(), index).is_some() {
                return Err(AsmError::DuplicateLabel {
                    line: line.number,
                    name: name.text.clone(),
                });
            }
            log::debug!("label {} -> {index}", name.text);
        }
        if !line.body.is_empty() {
            index += 1;
        }
    }
    Ok(labels)
}

/// Second pass: build one program per instruction line.
pub fn parse(tokens: &[Token], labels: &LabelTable) -> Result<Vec<Program>, AsmError> {
    lines(tokens)
        .filter_map(|line| {
            let (head, operands) = line.body.split_first()?;
            Some(parse_instruction(line.number, head, operands, labels))
        })
        .collect()
}

/// A resolved operand before it is positioned in the word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    Register(u8),
    Value(u16),
}

fn resolve(token: &Token, labels: &LabelTable) -> Result<Operand, AsmError> {
    if token.kind == TokenKind::Hex {
        let invalid = || AsmError::InvalidHex {
            line: token.line,
            token: token.text.clone(),
        };
        let digits = token.text.strip_prefix("0x").ok_or_else(invalid)?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        return u16::from_str_radix(digits, 16)
            .map(Operand::Value)
            .map_err(|_| invalid());
    }
    if let Some(&index) = labels.get(&token.text) {
        return Ok(Operand::Value(u16::try_from(index).unwrap_or(u16::MAX)));
    }
    if let Some(reg) = isa::register_by_name(&token.text) {
        return Ok(Operand::Register(reg.code));
    }
    Err(AsmError::UnresolvableOperand {
        line: token.line,
        token: token.text.clone(),
    })
}

fn fit(line: usize, value: u16, max: u16) -> Result<u16, AsmError> {
    if value > max {
        return Err(AsmError::OperandOutOfRange { line, value, max });
    }
    Ok(value)
}

fn unexpected(token: &Token) -> AsmError {
    AsmError::UnexpectedToken {
        line: token.line,
        token: token.text.clone(),
    }
}

/// Take one operand token off the front of `tokens`.
fn operand<'a>(
    line: usize,
    inst: &Instruction,
    tokens: &'a [Token],
) -> Result<(&'a Token, &'a [Token]), AsmError> {
    match tokens {
        [] => Err(AsmError::MissingOperand {
            line,
            mnemonic: inst.mnemonic,
        }),
        [token, rest @ ..]
            if matches!(
                token.kind,
                TokenKind::Reserved | TokenKind::Hex | TokenKind::Ident
            ) =>
        {
            Ok((token, rest))
        }
        [token, ..] => Err(unexpected(token)),
    }
}

fn expect_end(tokens: &[Token]) -> Result<(), AsmError> {
    match tokens.first() {
        None => Ok(()),
        Some(token) => Err(unexpected(token)),
    }
}

fn parse_instruction(
    line: usize,
    head: &Token,
    operands: &[Token],
    labels: &LabelTable,
) -> Result<Program, AsmError> {
    let inst = match head.kind {
        TokenKind::Comma | TokenKind::Colon => return Err(unexpected(head)),
        _ => isa::by_mnemonic(&head.text).ok_or_else(|| AsmError::UnknownMnemonic {
            line,
            token: head.text.clone(),
        })?,
    };

    let program = match inst.operands {
        OperandType::None => {
            expect_end(operands)?;
            Program::new(inst, 0, 0)
        }
        OperandType::Single => {
            let (token, rest) = operand(line, inst, operands)?;
            expect_end(rest)?;
            let first = match resolve(token, labels)? {
                Operand::Register(code) => u16::from(code) << 8,
                Operand::Value(value) => fit(line, value, BYTE_MAX)?,
            };
            Program::new(inst, first, 0)
        }
        OperandType::Double => {
            let (first_token, rest) = operand(line, inst, operands)?;
            let rest = match rest {
                [comma, rest @ ..] if comma.kind == TokenKind::Comma => rest,
                [] => {
                    return Err(AsmError::MissingOperand {
                        line,
                        mnemonic: inst.mnemonic,
                    });
                }
                [token, ..] => return Err(unexpected(token)),
            };
            let (second_token, rest) = operand(line, inst, rest)?;
            expect_end(rest)?;
            let first = match resolve(first_token, labels)? {
                Operand::Register(code) => u16::from(code),
                Operand::Value(value) => fit(line, value, REGISTER_MAX)?,
            };
            let second = match resolve(second_token, labels)? {
                Operand::Register(code) => u16::from(code) << 5,
                Operand::Value(value) => fit(line, value, BYTE_MAX)?,
            };
            Program::new(inst, first, second)
        }
    };
    log::debug!(
        "line {line}: {} {:#x}, {:#x}",
        inst.mnemonic,
        program.first_operand,
        program.second_operand
    );
    Ok(program)
}
