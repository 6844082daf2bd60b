use num_enum::TryFromPrimitive;

/// Permission flags a contract call grants the callee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum CallFlags {
	None = 0,
	ReadStates = 0b0000_0001,
	WriteStates = 0b0000_0010,
	AllowCall = 0b0000_0100,
	AllowNotify = 0b0000_1000,
	States = 0b0000_0011,
	ReadOnly = 0b0000_0101,
	All = 0b0000_1111,
}

impl CallFlags {
	pub fn value(self) -> u8 {
		self as u8
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_values_compose() {
		assert_eq!(
			CallFlags::States.value(),
			CallFlags::ReadStates.value() | CallFlags::WriteStates.value()
		);
		assert_eq!(
			CallFlags::All.value(),
			CallFlags::States.value()
				| CallFlags::AllowCall.value()
				| CallFlags::AllowNotify.value()
		);
	}
}
