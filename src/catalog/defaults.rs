use super::definition::{FunctionConfiguration, PinDefinition};
use crate::model::{Direction, SignalType};
use ahash::AHashMap;

/// Defines the built-in function block types, their registration and the list
/// of their names.
macro_rules! define_function_blocks {
    ( $( ($type_name:expr, $label:expr, $description:expr, [ $( ($direction:ident, $signal:ident, $pin_label:expr, $pin_description:expr) ),* $(,)? ]) ),* $(,)? ) => {
        /// Names of every built-in function type, in catalog order.
        pub const DEFAULT_FUNCTION_TYPES: &[&str] = &[ $( $type_name ),* ];

        pub(super) fn register_default_configurations(registry: &mut AHashMap<String, FunctionConfiguration>) {
            $(
                registry.insert(
                    $type_name.to_lowercase(),
                    FunctionConfiguration {
                        function_type: $type_name.to_string(),
                        label: $label.to_string(),
                        description: $description.to_string(),
                        io: vec![
                            $(
                                PinDefinition {
                                    label: $pin_label.to_string(),
                                    description: $pin_description.to_string(),
                                    signal_type: SignalType::$signal,
                                    direction: Direction::$direction,
                                },
                            )*
                        ],
                    },
                );
            )*
        }
    };
}

define_function_blocks! {
    ("And", "AND", "A 2 input AND gate", [
        (Input, Digital, "Input 1", "Binary input 1 of AND gate"),
        (Input, Digital, "Input 2", "Binary input 2 of AND gate"),
        (Output, Digital, "Output", "Binary output of AND gate"),
    ]),
    ("Average", "AVG", "Average of 3 analogue inputs", [
        (Input, Analogue, "Input 1", "Analogue input 1"),
        (Input, Analogue, "Input 2", "Analogue input 2"),
        (Input, Analogue, "Input 3", "Analogue input 3"),
        (Output, Analogue, "Output", "Mean of the inputs"),
    ]),
    ("Calculator", "CALC", "Evaluates an expression over two operands", [
        (Input, Analogue, "A", "First operand"),
        (Input, Analogue, "B", "Second operand"),
        (Output, Analogue, "Result", "Expression result"),
    ]),
    ("Calendar", "CAL", "Active during configured calendar periods", [
        (Output, Digital, "Active", "On while inside a calendar period"),
    ]),
    ("Clamp", "CLAMP", "Limits a value to a range", [
        (Input, Analogue, "Input", "Value to clamp"),
        (Input, Analogue, "Min", "Lower limit"),
        (Input, Analogue, "Max", "Upper limit"),
        (Output, Analogue, "Output", "Clamped value"),
    ]),
    ("Comparator", "CMP", "Compares two analogue values", [
        (Input, Analogue, "A", "Left hand value"),
        (Input, Analogue, "B", "Right hand value"),
        (Output, Digital, "A > B", "On when A is greater than B"),
    ]),
    ("Delay", "DELAY", "Delays a binary signal", [
        (Input, Digital, "Input 1", "Binary input of DELAY gate"),
        (Output, Digital, "Output", "Binary output of DELAY gate"),
    ]),
    ("If", "IF", "Chooses between two values", [
        (Input, Digital, "Condition", "Selects the true value when on"),
        (Input, Analogue, "True", "Value when condition is on"),
        (Input, Analogue, "False", "Value when condition is off"),
        (Output, Analogue, "Output", "Selected value"),
    ]),
    ("Invert", "NOT", "Inverts a binary signal", [
        (Input, Digital, "Input 1", "Binary input of NOT gate"),
        (Output, Digital, "Output", "Binary output of NOT gate"),
    ]),
    ("Latch", "LATCH", "Latches a value for later reference", [
        (Input, Analogue, "Input", "Value to latch"),
        (Input, Digital, "Latch", "Captures the input on a rising edge"),
        (Output, Analogue, "Output", "Latched value"),
    ]),
    ("Max", "MAX", "Maximum of two values", [
        (Input, Analogue, "Input 1", "Analogue input 1"),
        (Input, Analogue, "Input 2", "Analogue input 2"),
        (Output, Analogue, "Output", "Larger input"),
    ]),
    ("Min", "MIN", "Minimum of two values", [
        (Input, Analogue, "Input 1", "Analogue input 1"),
        (Input, Analogue, "Input 2", "Analogue input 2"),
        (Output, Analogue, "Output", "Smaller input"),
    ]),
    ("Or", "OR", "A 2 input OR gate", [
        (Input, Digital, "Input 1", "Binary input 1 of OR gate"),
        (Input, Digital, "Input 2", "Binary input 2 of OR gate"),
        (Output, Digital, "Output", "Binary output of OR gate"),
    ]),
    ("Override", "OVR", "Replaces a value while override is enabled", [
        (Input, Analogue, "Input", "Normal value"),
        (Input, Digital, "Enable", "Override enable"),
        (Input, Analogue, "Value", "Override value"),
        (Output, Analogue, "Output", "Resulting value"),
    ]),
    ("Pid", "PID", "Proportional-integral-derivative controller", [
        (Input, Analogue, "Setpoint", "Target process value"),
        (Input, Analogue, "Process", "Measured process value"),
        (Input, Digital, "Enable", "Runs the control loop when on"),
        (Output, Pwm, "Output", "Controller output"),
    ]),
    ("Pulse", "PULSE", "Emits a fixed width pulse", [
        (Input, Digital, "Input 1", "Binary input of PULSE gate"),
        (Output, Digital, "Output", "Binary output of PULSE gate"),
    ]),
    ("Schedule", "SCHED", "On during scheduled times", [
        (Output, Digital, "On", "On while a schedule entry is active"),
    ]),
    ("Selector", "SEL", "Selects one of two analogue inputs", [
        (Input, Analogue, "Input 1", "Analogue input 1"),
        (Input, Analogue, "Input 2", "Analogue input 2"),
        (Input, Digital, "Select", "Chooses input 2 when on"),
        (Output, Analogue, "Output", "Selected input"),
    ]),
    ("Sequence", "SEQ", "Sequences a set of outputs based on input selectors", [
        (Input, Digital, "Advance", "Moves to the next step"),
        (Input, Digital, "Reset", "Returns to the first step"),
        (Output, Digital, "Step 1", "On during step 1"),
        (Output, Digital, "Step 2", "On during step 2"),
        (Output, Digital, "Step 3", "On during step 3"),
    ]),
    ("Span", "SPAN", "Spans an input value range to an output value range", [
        (Input, Analogue, "Input", "Value in the input range"),
        (Output, Analogue, "Output", "Value in the output range"),
    ]),
    ("Split", "SPLIT", "Copies one analogue value to two outputs", [
        (Input, Analogue, "Input", "Value to split"),
        (Output, Analogue, "Output 1", "Copy 1"),
        (Output, Analogue, "Output 2", "Copy 2"),
    ]),
    ("Timer", "TIMER", "Counts elapsed time", [
        (Input, Digital, "Start", "Starts the timer"),
        (Input, Digital, "Reset", "Resets the timer"),
        (Output, Digital, "Elapsed", "On once the period has elapsed"),
    ]),
    ("Xnor", "XNOR", "A 2 input XNOR gate", [
        (Input, Digital, "Input 1", "Binary input 1 of XNOR gate"),
        (Input, Digital, "Input 2", "Binary input 2 of XNOR gate"),
        (Output, Digital, "Output", "Binary output of XNOR gate"),
    ]),
    ("Xor", "XOR", "A 2 input XOR gate", [
        (Input, Digital, "Input 1", "Binary input 1 of XOR gate"),
        (Input, Digital, "Input 2", "Binary input 2 of XOR gate"),
        (Output, Digital, "Output", "Binary output of XOR gate"),
    ]),
}
