// Copyright 2025 The Stabrank Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License. You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

//! A restricted OpenQASM 2.0 surface: the `OPENQASM 2.0;` header, the
//! `qelib1.inc` include, a single quantum register, and the canonical gate
//! set in lowercase. Everything else (parameterized rotations, classical
//! registers, extra registers, malformed statements) is rejected with a
//! value error.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::circuit::Circuit;
use crate::error::SimError;
use crate::gate::{Gate, GateKind};

fn value_error(msg: impl Into<String>) -> SimError {
    SimError::Value(msg.into())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Splits the source into `;`-terminated statements; a statement missing its
/// terminator is a value error.
fn statements(source: &str) -> Result<Vec<String>, SimError> {
    let mut out = Vec::new();
    for line in source.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut pieces = line.split(';').map(str::trim).collect::<Vec<_>>();
        match pieces.pop() {
            Some("") => {}
            _ => return Err(value_error(format!("missing ';' after '{line}'"))),
        }
        for piece in pieces {
            if piece.is_empty() {
                return Err(value_error(format!("empty statement in '{line}'")));
            }
            out.push(piece.to_string());
        }
    }
    Ok(out)
}

/// Parses `<reg>[<index>]` against the declared register.
fn parse_operand(token: &str, register: &str, size: usize) -> Result<usize, SimError> {
    let rest = token
        .strip_prefix(register)
        .ok_or_else(|| value_error(format!("operand '{token}' does not use register '{register}'")))?;
    let digits = rest
        .strip_prefix('[')
        .and_then(|r| r.strip_suffix(']'))
        .ok_or_else(|| value_error(format!("malformed operand '{token}'")))?;
    let index: usize = digits
        .parse()
        .map_err(|_| value_error(format!("malformed qubit index in operand '{token}'")))?;
    if index >= size {
        return Err(value_error(format!(
            "qubit index {index} out of range for register '{register}[{size}]'"
        )));
    }
    Ok(index)
}

fn parse_register_decl(stmt: &str) -> Result<(String, usize), SimError> {
    let decl = stmt
        .strip_prefix("qreg")
        .ok_or_else(|| value_error(format!("expected a qreg declaration, got '{stmt}'")))?
        .trim();
    let (name, rest) = decl
        .split_once('[')
        .ok_or_else(|| value_error(format!("malformed qreg declaration '{stmt}'")))?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(value_error(format!("invalid register name '{name}'")));
    }
    let digits = rest
        .strip_suffix(']')
        .ok_or_else(|| value_error(format!("malformed qreg declaration '{stmt}'")))?;
    let size: usize = digits
        .parse()
        .map_err(|_| value_error(format!("malformed register size in '{stmt}'")))?;
    if size == 0 {
        return Err(value_error("register size must be positive".to_string()));
    }
    Ok((name.to_string(), size))
}

pub(crate) fn parse(source: &str) -> Result<Circuit, SimError> {
    let stmts = statements(source)?;
    let mut iter = stmts.iter();

    match iter.next().map(String::as_str) {
        Some("OPENQASM 2.0") => {}
        other => {
            return Err(value_error(format!(
                "expected 'OPENQASM 2.0;' header, got '{}'",
                other.unwrap_or("")
            )))
        }
    }
    match iter.next().map(String::as_str) {
        Some(r#"include "qelib1.inc""#) => {}
        other => {
            return Err(value_error(format!(
                "expected 'include \"qelib1.inc\";', got '{}'",
                other.unwrap_or("")
            )))
        }
    }
    let (register, size) = parse_register_decl(
        iter.next()
            .ok_or_else(|| value_error("missing qreg declaration".to_string()))?,
    )?;

    let mut circuit = Circuit::new(size);
    for stmt in iter {
        let (name, operands) = stmt
            .split_once(char::is_whitespace)
            .ok_or_else(|| value_error(format!("malformed statement '{stmt}'")))?;
        if name == "qreg" {
            return Err(value_error("multiple quantum registers are not supported".to_string()));
        }
        if name == "creg" || name == "measure" || name == "barrier" || name == "reset" {
            return Err(value_error(format!("unsupported statement '{stmt}'")));
        }
        if name.contains('(') || operands.contains('(') {
            return Err(value_error(format!(
                "parameterized gates are not supported: '{stmt}'"
            )));
        }
        if name != name.to_ascii_lowercase() {
            return Err(value_error(format!("gate names must be lowercase: '{name}'")));
        }
        let kind = GateKind::from_name(name)?;
        let qubits = operands
            .split(',')
            .map(|tok| parse_operand(tok.trim(), &register, size))
            .collect::<Result<Vec<_>, _>>()?;
        circuit.push(Gate::new(kind, qubits)?);
    }
    Ok(circuit)
}

pub(crate) fn emit(circuit: &Circuit, register: &str) -> Result<String, SimError> {
    if !is_identifier(register) {
        return Err(value_error(format!("invalid register name '{register}'")));
    }
    let size = circuit.num_qubits();
    let mut out = String::new();
    out.push_str("OPENQASM 2.0;\n");
    out.push_str("include \"qelib1.inc\";\n");
    let _ = writeln!(out, "qreg {register}[{size}];");
    for gate in circuit.gates() {
        if let Some(&q) = gate.qubits().iter().find(|&&q| q >= size) {
            return Err(value_error(format!(
                "gate {gate} names qubit {q}, but the circuit has {size} qubits"
            )));
        }
        let operands = gate
            .qubits()
            .iter()
            .map(|q| format!("{register}[{q}]"))
            .collect::<Vec<_>>()
            .join(", ");
        let _ = writeln!(out, "{} {operands};", gate.name().to_ascii_lowercase());
    }
    Ok(out)
}

impl Circuit {
    /// Parses the restricted OpenQASM 2.0 dialect.
    ///
    /// # Errors
    /// Value error on anything outside the dialect: a missing header or
    /// include, parameterized gates, classical or extra registers, unknown
    /// gates, malformed operands, or missing semicolons.
    pub fn from_qasm_str(source: &str) -> Result<Self, SimError> {
        parse(source)
    }

    /// Emits the circuit in the same dialect with a caller-chosen register
    /// name.
    ///
    /// # Errors
    /// Value error when the register name is not a valid identifier or a
    /// gate names a qubit outside the circuit.
    pub fn to_qasm_str(&self, register: &str) -> Result<String, SimError> {
        emit(self, register)
    }

    /// Reads and parses a QASM file.
    ///
    /// # Errors
    /// I/O error when the file cannot be read, otherwise as
    /// [`Circuit::from_qasm_str`].
    pub fn from_qasm_file(path: impl AsRef<Path>) -> Result<Self, SimError> {
        parse(&fs::read_to_string(path)?)
    }

    /// Writes the circuit to a QASM file.
    ///
    /// # Errors
    /// I/O error when the file cannot be written, otherwise as
    /// [`Circuit::to_qasm_str`].
    pub fn to_qasm_file(&self, path: impl AsRef<Path>, register: &str) -> Result<(), SimError> {
        fs::write(path, emit(self, register)?)?;
        Ok(())
    }
}
