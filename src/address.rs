//! Register address translation for Modbus reads.
//!
//! Profile files use Modicon-style register numbers (`4xxxx` holding,
//! `3xxxx` input, `1xxxx` discrete). A read needs the zero-based offset
//! within the register table and the number of 16-bit registers to fetch.

use crate::constants::{DEFAULT_UNIT_ID, DOUBLE_WIDTH_DATATYPES, modicon};
use crate::models::{Parameter, ReadDescriptor, ReadMetadata};

/// Strip the Modicon range offset from a register number
///
/// Registers below 10001 are assumed to already be zero-based.
pub fn zero_based_address(register: u32) -> u32 {
    modicon::OFFSETS
        .iter()
        .find(|&&base| register >= base)
        .map_or(register, |&base| register - base)
}

/// Number of 16-bit registers occupied by a data type
pub fn register_quantity(datatype: &str) -> u16 {
    if DOUBLE_WIDTH_DATATYPES.contains(&datatype) {
        2
    } else {
        1
    }
}

/// Translate a parameter into a read descriptor for the given unit
pub fn translate_address(param: &Parameter, unit_id: u8) -> ReadDescriptor {
    let name = if param.description.is_empty() {
        param.param_name.clone()
    } else {
        param.description.clone()
    };

    ReadDescriptor {
        name,
        unit_id,
        function_code: param.function_code,
        address: zero_based_address(param.register),
        quantity: register_quantity(&param.datatype),
        metadata: ReadMetadata {
            param_name: param.param_name.clone(),
            tag: param.tag.clone(),
            scale: param.scale,
            unit: param.unit.clone(),
            datatype: param.datatype.clone(),
        },
    }
}

impl Parameter {
    /// Read descriptor addressed to the default unit
    pub fn read_descriptor(&self) -> ReadDescriptor {
        translate_address(self, DEFAULT_UNIT_ID)
    }
}
