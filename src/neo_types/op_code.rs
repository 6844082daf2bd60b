use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

/// NeoVM instruction op codes.
///
/// Only the subset the SDK emits or inspects carries doc comments; the
/// full table is kept so scripts read back from the chain can be decoded.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum OpCode {
	/// Pushes a 1-byte signed integer.
	PushInt8 = 0x00,
	/// Pushes a 2-byte signed integer (little-endian).
	PushInt16 = 0x01,
	PushInt32 = 0x02,
	PushInt64 = 0x03,
	PushInt128 = 0x04,
	PushInt256 = 0x05,
	PushTrue = 0x08,
	PushFalse = 0x09,
	/// Pushes a 4-byte instruction pointer offset.
	PushA = 0x0A,
	/// Pushes the null item.
	PushNull = 0x0B,
	/// Pushes data with a 1-byte length prefix.
	PushData1 = 0x0C,
	/// Pushes data with a 2-byte length prefix.
	PushData2 = 0x0D,
	/// Pushes data with a 4-byte length prefix.
	PushData4 = 0x0E,
	/// Pushes the constant -1.
	PushM1 = 0x0F,
	/// Pushes the constant 0. `Push0 + n` pushes n for n in 0..=16.
	Push0 = 0x10,
	Push1 = 0x11,
	Push2 = 0x12,
	Push3 = 0x13,
	Push4 = 0x14,
	Push5 = 0x15,
	Push6 = 0x16,
	Push7 = 0x17,
	Push8 = 0x18,
	Push9 = 0x19,
	Push10 = 0x1A,
	Push11 = 0x1B,
	Push12 = 0x1C,
	Push13 = 0x1D,
	Push14 = 0x1E,
	Push15 = 0x1F,
	Push16 = 0x20,

	Nop = 0x21,
	/// Unconditional jump, 1-byte signed offset.
	Jmp = 0x22,
	JmpL = 0x23,
	JmpIf = 0x24,
	JmpIfL = 0x25,
	JmpIfNot = 0x26,
	JmpIfNotL = 0x27,
	JmpEq = 0x28,
	JmpEqL = 0x29,
	JmpNe = 0x2A,
	JmpNeL = 0x2B,
	JmpGt = 0x2C,
	JmpGtL = 0x2D,
	JmpGe = 0x2E,
	JmpGeL = 0x2F,
	JmpLt = 0x30,
	JmpLtL = 0x31,
	JmpLe = 0x32,
	JmpLeL = 0x33,
	Call = 0x34,
	CallL = 0x35,
	CallA = 0x36,
	CallT = 0x37,
	Abort = 0x38,
	Assert = 0x39,
	Throw = 0x3A,
	Try = 0x3B,
	TryL = 0x3C,
	EndTry = 0x3D,
	EndTryL = 0x3E,
	EndFinally = 0x3F,
	Ret = 0x40,
	/// Invokes an interop service; 4-byte descriptor hash operand.
	Syscall = 0x41,

	Depth = 0x43,
	Drop = 0x45,
	Nip = 0x46,
	Xdrop = 0x48,
	Clear = 0x49,
	Dup = 0x4A,
	Over = 0x4B,
	Pick = 0x4D,
	Tuck = 0x4E,
	Swap = 0x50,
	Rot = 0x51,
	Roll = 0x52,
	Reverse3 = 0x53,
	Reverse4 = 0x54,
	ReverseN = 0x55,

	InitSSlot = 0x56,
	InitSlot = 0x57,
	LdSFld0 = 0x58,
	LdSFld1 = 0x59,
	LdSFld2 = 0x5A,
	LdSFld3 = 0x5B,
	LdSFld4 = 0x5C,
	LdSFld5 = 0x5D,
	LdSFld6 = 0x5E,
	LdSFld = 0x5F,
	StSFld0 = 0x60,
	StSFld1 = 0x61,
	StSFld2 = 0x62,
	StSFld3 = 0x63,
	StSFld4 = 0x64,
	StSFld5 = 0x65,
	StSFld6 = 0x66,
	StSFld = 0x67,
	LdLoc0 = 0x68,
	LdLoc1 = 0x69,
	LdLoc2 = 0x6A,
	LdLoc3 = 0x6B,
	LdLoc4 = 0x6C,
	LdLoc5 = 0x6D,
	LdLoc6 = 0x6E,
	LdLoc = 0x6F,
	StLoc0 = 0x70,
	StLoc1 = 0x71,
	StLoc2 = 0x72,
	StLoc3 = 0x73,
	StLoc4 = 0x74,
	StLoc5 = 0x75,
	StLoc6 = 0x76,
	StLoc = 0x77,
	LdArg0 = 0x78,
	LdArg1 = 0x79,
	LdArg2 = 0x7A,
	LdArg3 = 0x7B,
	LdArg4 = 0x7C,
	LdArg5 = 0x7D,
	LdArg6 = 0x7E,
	LdArg = 0x7F,
	StArg0 = 0x80,
	StArg1 = 0x81,
	StArg2 = 0x82,
	StArg3 = 0x83,
	StArg4 = 0x84,
	StArg5 = 0x85,
	StArg6 = 0x86,
	StArg = 0x87,

	NewBuffer = 0x88,
	MemCpy = 0x89,
	Cat = 0x8B,
	SubStr = 0x8C,
	Left = 0x8D,
	Right = 0x8E,

	Invert = 0x90,
	And = 0x91,
	Or = 0x92,
	Xor = 0x93,
	Equal = 0x97,
	NotEqual = 0x98,

	Sign = 0x99,
	Abs = 0x9A,
	Negate = 0x9B,
	Inc = 0x9C,
	Dec = 0x9D,
	Add = 0x9E,
	Sub = 0x9F,
	Mul = 0xA0,
	Div = 0xA1,
	Mod = 0xA2,
	Pow = 0xA3,
	Sqrt = 0xA4,
	ModMul = 0xA5,
	ModPow = 0xA6,
	Shl = 0xA8,
	Shr = 0xA9,
	Not = 0xAA,
	BoolAnd = 0xAB,
	BoolOr = 0xAC,
	Nz = 0xB1,
	NumEqual = 0xB3,
	NumNotEqual = 0xB4,
	Lt = 0xB5,
	Le = 0xB6,
	Gt = 0xB7,
	Ge = 0xB8,
	Min = 0xB9,
	Max = 0xBA,
	Within = 0xBB,

	/// Packs key/value pairs into a map; count on top of the stack.
	PackMap = 0xBE,
	PackStruct = 0xBF,
	/// Packs items into an array; count on top of the stack.
	Pack = 0xC0,
	Unpack = 0xC1,
	/// Pushes an empty array.
	NewArray0 = 0xC2,
	NewArray = 0xC3,
	NewArrayT = 0xC4,
	NewStruct0 = 0xC5,
	NewStruct = 0xC6,
	NewMap = 0xC8,
	Size = 0xCA,
	HasKey = 0xCB,
	Keys = 0xCC,
	Values = 0xCD,
	PickItem = 0xCE,
	Append = 0xCF,
	SetItem = 0xD0,
	ReverseItems = 0xD1,
	Remove = 0xD2,
	ClearItems = 0xD3,
	PopItem = 0xD4,

	IsNull = 0xD8,
	IsType = 0xD9,
	Convert = 0xDB,

	AbortMsg = 0xE0,
	AssertMsg = 0xE1,
}

impl fmt::Display for OpCode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}", self)
	}
}

impl OpCode {
	pub fn opcode(self) -> u8 {
		self.into()
	}

	pub fn to_hex_string(self) -> String {
		format!("{:02x}", self.opcode())
	}

	/// The size of the instruction's fixed operand, if it has one.
	pub fn operand_size(self) -> Option<OperandSize> {
		match self {
			OpCode::PushInt8
			| OpCode::Jmp
			| OpCode::JmpIf
			| OpCode::JmpIfNot
			| OpCode::JmpEq
			| OpCode::JmpNe
			| OpCode::JmpGt
			| OpCode::JmpGe
			| OpCode::JmpLt
			| OpCode::JmpLe
			| OpCode::Call
			| OpCode::EndTry
			| OpCode::InitSSlot
			| OpCode::LdSFld
			| OpCode::StSFld
			| OpCode::LdLoc
			| OpCode::StLoc
			| OpCode::LdArg
			| OpCode::StArg
			| OpCode::NewArrayT
			| OpCode::IsType
			| OpCode::Convert => Some(OperandSize::with_size(1)),
			OpCode::PushInt16 | OpCode::CallT | OpCode::Try | OpCode::InitSlot =>
				Some(OperandSize::with_size(2)),
			OpCode::PushInt32
			| OpCode::PushA
			| OpCode::JmpL
			| OpCode::JmpIfL
			| OpCode::JmpIfNotL
			| OpCode::JmpEqL
			| OpCode::JmpNeL
			| OpCode::JmpGtL
			| OpCode::JmpGeL
			| OpCode::JmpLtL
			| OpCode::JmpLeL
			| OpCode::CallL
			| OpCode::EndTryL
			| OpCode::Syscall => Some(OperandSize::with_size(4)),
			OpCode::PushInt64 | OpCode::TryL => Some(OperandSize::with_size(8)),
			OpCode::PushInt128 => Some(OperandSize::with_size(16)),
			OpCode::PushInt256 => Some(OperandSize::with_size(32)),
			OpCode::PushData1 => Some(OperandSize::with_prefix_size(1)),
			OpCode::PushData2 => Some(OperandSize::with_prefix_size(2)),
			OpCode::PushData4 => Some(OperandSize::with_prefix_size(4)),
			_ => None,
		}
	}
}

/// Operand layout of an instruction: either a fixed size or a length
/// prefix followed by that many bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperandSize {
	pub prefix_size: usize,
	pub size: usize,
}

impl OperandSize {
	pub fn with_size(size: usize) -> Self {
		Self { prefix_size: 0, size }
	}

	pub fn with_prefix_size(prefix_size: usize) -> Self {
		Self { prefix_size, size: 0 }
	}
}
