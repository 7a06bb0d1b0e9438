//! SignalPath: the machine orchestrator.
//!
//! Owns the rotor stack, the reflector and the optional plugboard, and
//! drives each key press through
//! plugboard → rotors (right to left) → reflector → rotors (left to right) → plugboard,
//! after stepping the rotors once.
//!
//! Rotor slots are numbered from 1 in configuration order: slot 1 is the
//! leftmost rotor (next to the reflector), the last slot is the rightmost
//! rotor (next to the keyboard), which steps on every key press.

use crate::catalogue::{self, MachineModel, ModelDescriptor};
use crate::contact::Contact;
use crate::error::{EnigmaError, Result};
use crate::plugboard::Plugboard;
use crate::reflector::Reflector;
use crate::rotor::Rotor;
use crate::trace::{LogTracer, SignalTracer, Stage};

/// Components fitted by a successful configuration.
#[derive(Debug, Clone)]
struct Machine {
    model: ModelDescriptor,
    /// Left to right.
    rotors: Vec<Rotor>,
    reflector: Reflector,
    plugboard: Option<Plugboard>,
}

/// Rotor cipher machine: one instance per logical machine, one key press
/// at a time.
///
/// # Examples
///
/// ```
/// use enigma_engine::{catalogue::ENIGMA_1, SignalPath};
///
/// let mut machine = SignalPath::new();
/// machine.configure(&ENIGMA_1, &["I", "II", "III"], "B").unwrap();
/// assert_eq!(machine.encrypt_text("AAAAA").unwrap(), "BDZGO");
/// ```
#[derive(Debug, Clone)]
pub struct SignalPath<T: SignalTracer = LogTracer> {
    machine: Option<Machine>,
    last_error: Option<EnigmaError>,
    tracer: T,
}

impl Default for SignalPath<LogTracer> {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalPath<LogTracer> {
    /// Creates an unconfigured machine that traces through the `log` facade.
    pub fn new() -> Self {
        Self::with_tracer(LogTracer)
    }

    /// Creates and configures a built-in model in one go.
    ///
    /// # Errors
    /// Any error of [`SignalPath::configure`].
    ///
    /// # Examples
    ///
    /// ```
    /// use enigma_engine::{MachineModel, SignalPath};
    ///
    /// let mut machine = SignalPath::for_model(MachineModel::M3, &["I", "II", "III"], "B").unwrap();
    /// assert_eq!(machine.encrypt_text("BDZGO").unwrap(), "AAAAA");
    /// ```
    pub fn for_model<S: AsRef<str>>(
        model: MachineModel,
        rotor_names: &[S],
        reflector_name: &str,
    ) -> Result<Self> {
        let mut path = Self::new();
        path.configure(model.descriptor(), rotor_names, reflector_name)?;
        Ok(path)
    }
}

impl<T: SignalTracer> SignalPath<T> {
    /// Creates an unconfigured machine reporting to `tracer`.
    pub fn with_tracer(tracer: T) -> Self {
        SignalPath {
            machine: None,
            last_error: None,
            tracer,
        }
    }

    /// Fits rotors, reflector and (if the model has one) a plugboard.
    ///
    /// # Parameters
    /// - `model`: Model descriptor; consulted only here.
    /// - `rotor_names`: Rotor names left to right.
    /// - `reflector_name`: Reflector name, optionally `UKW-` prefixed.
    ///
    /// # Errors
    /// - [`EnigmaError::AlreadyConfigured`] if called twice.
    /// - [`EnigmaError::WrongRotorCount`] if the list length differs from the model's.
    /// - [`EnigmaError::UnknownRotor`] naming the first rejected rotor.
    /// - [`EnigmaError::UnknownReflector`] if the reflector is not available.
    ///
    /// On failure nothing is fitted, the machine stays unconfigured and the
    /// error is also kept in [`SignalPath::last_error`].
    pub fn configure<S: AsRef<str>>(
        &mut self,
        model: &ModelDescriptor,
        rotor_names: &[S],
        reflector_name: &str,
    ) -> Result<()> {
        if self.machine.is_some() {
            return self.fail(EnigmaError::AlreadyConfigured);
        }

        log::debug!("configuring {} machine", model.long_name);
        match Self::build(model, rotor_names, reflector_name) {
            Ok(machine) => {
                self.machine = Some(machine);
                self.last_error = None;
                Ok(())
            }
            Err(err) => self.fail(err),
        }
    }

    fn fail(&mut self, err: EnigmaError) -> Result<()> {
        log::warn!("configuration failed: {}", err);
        self.last_error = Some(err.clone());
        Err(err)
    }

    /// Validates the request and builds every component.
    fn build<S: AsRef<str>>(
        model: &ModelDescriptor,
        rotor_names: &[S],
        reflector_name: &str,
    ) -> Result<Machine> {
        if rotor_names.len() != model.rotor_count {
            return Err(EnigmaError::WrongRotorCount {
                expected: model.rotor_count,
                actual: rotor_names.len(),
            });
        }

        let mut rotors = Vec::with_capacity(model.rotor_count);
        for name in rotor_names {
            let name = name.as_ref();
            let spec = catalogue::rotor(name)
                .filter(|_| model.allows_rotor(name))
                .ok_or_else(|| EnigmaError::UnknownRotor {
                    name: name.to_string(),
                })?;
            rotors.push(Rotor::new(spec.name, spec.wiring, spec.notches)?);
            log::debug!("added rotor '{}'", name);
        }

        let spec = catalogue::reflector(reflector_name)
            .filter(|_| model.allows_reflector(reflector_name))
            .ok_or_else(|| EnigmaError::UnknownReflector {
                name: reflector_name.to_string(),
            })?;
        let reflector = Reflector::new(spec.name, spec.wiring)?;
        log::debug!("using reflector '{}'", spec.name);

        let plugboard = if model.has_plugboard {
            log::debug!("machine is using a plugboard");
            Some(Plugboard::new())
        } else {
            None
        };

        Ok(Machine {
            model: model.clone(),
            rotors,
            reflector,
            plugboard,
        })
    }

    /// `true` once [`SignalPath::configure`] has succeeded.
    pub fn is_configured(&self) -> bool {
        self.machine.is_some()
    }

    /// Error of the last failed configuration attempt, cleared on success.
    pub fn last_error(&self) -> Option<&EnigmaError> {
        self.last_error.as_ref()
    }

    /// Descriptor of the configured model.
    pub fn model(&self) -> Option<&ModelDescriptor> {
        self.machine.as_ref().map(|m| &m.model)
    }

    /// Number of fitted rotors (0 while unconfigured).
    pub fn rotor_count(&self) -> usize {
        self.machine.as_ref().map_or(0, |m| m.rotors.len())
    }

    /// Names of the fitted rotors, left to right.
    pub fn rotor_names(&self) -> Vec<&str> {
        self.machine
            .as_ref()
            .map(|m| m.rotors.iter().map(Rotor::name).collect())
            .unwrap_or_default()
    }

    /// Name of the fitted reflector.
    pub fn reflector_name(&self) -> Option<&str> {
        self.machine.as_ref().map(|m| m.reflector.name())
    }

    /// Window letters, left to right.
    pub fn rotor_positions(&self) -> Vec<Contact> {
        self.machine
            .as_ref()
            .map(|m| m.rotors.iter().map(Rotor::position).collect())
            .unwrap_or_default()
    }

    /// `true` if the configured model has a plugboard.
    pub fn has_plugboard(&self) -> bool {
        self.machine
            .as_ref()
            .is_some_and(|m| m.plugboard.is_some())
    }

    /// The plugboard, if fitted.
    pub fn plugboard(&self) -> Option<&Plugboard> {
        self.machine.as_ref().and_then(|m| m.plugboard.as_ref())
    }

    /// Mutable access to the plugboard, if fitted.
    pub fn plugboard_mut(&mut self) -> Option<&mut Plugboard> {
        self.machine.as_mut().and_then(|m| m.plugboard.as_mut())
    }

    /// Plugs a cable between `src` and `dest`.
    ///
    /// # Errors
    /// [`EnigmaError::NotConfigured`] before configuration,
    /// [`EnigmaError::InvalidPlug`] if the model has no plugboard or the
    /// pairing conflicts.
    pub fn set_plug(&mut self, src: Contact, dest: Contact) -> Result<()> {
        let machine = self.machine.as_mut().ok_or(EnigmaError::NotConfigured)?;
        let short_name = machine.model.short_name;
        machine
            .plugboard
            .as_mut()
            .ok_or_else(|| EnigmaError::plug(format!("{} has no plugboard", short_name)))?
            .set_plug(src, dest)
    }

    /// The tracer.
    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    /// Mutable access to the tracer.
    pub fn tracer_mut(&mut self) -> &mut T {
        &mut self.tracer
    }

    // ──────── Slot addressing ────────

    fn machine(&self) -> Result<&Machine> {
        self.machine.as_ref().ok_or(EnigmaError::NotConfigured)
    }

    fn rotor(&self, slot: usize) -> Result<&Rotor> {
        let machine = self.machine()?;
        let index = slot_index(slot, machine.rotors.len())?;
        Ok(&machine.rotors[index])
    }

    fn rotor_mut(&mut self, slot: usize) -> Result<&mut Rotor> {
        let machine = self.machine.as_mut().ok_or(EnigmaError::NotConfigured)?;
        let index = slot_index(slot, machine.rotors.len())?;
        Ok(&mut machine.rotors[index])
    }

    /// Window letter of the rotor in `slot`.
    ///
    /// # Errors
    /// [`EnigmaError::NotConfigured`] or [`EnigmaError::InvalidRotorSlot`].
    pub fn rotor_position(&self, slot: usize) -> Result<Contact> {
        Ok(self.rotor(slot)?.position())
    }

    /// Turns the rotor in `slot` to `position`; [`SignalPath::reset`]
    /// returns it there.
    ///
    /// # Errors
    /// [`EnigmaError::NotConfigured`] or [`EnigmaError::InvalidRotorSlot`].
    pub fn set_rotor_position(&mut self, slot: usize, position: Contact) -> Result<()> {
        self.rotor_mut(slot)?.set_position(position);
        Ok(())
    }

    /// Ring setting of the rotor in `slot`.
    ///
    /// # Errors
    /// [`EnigmaError::NotConfigured`] or [`EnigmaError::InvalidRotorSlot`].
    pub fn ring_setting(&self, slot: usize) -> Result<Contact> {
        Ok(self.rotor(slot)?.ring_setting())
    }

    /// Sets the ring setting of the rotor in `slot`.
    ///
    /// # Errors
    /// [`EnigmaError::NotConfigured`] or [`EnigmaError::InvalidRotorSlot`].
    pub fn set_ring_setting(&mut self, slot: usize, ring: Contact) -> Result<()> {
        self.rotor_mut(slot)?.set_ring_setting(ring);
        Ok(())
    }

    /// Returns every rotor to its last explicitly set position.
    pub fn reset(&mut self) {
        if let Some(machine) = self.machine.as_mut() {
            for rotor in machine.rotors.iter_mut() {
                rotor.reset();
            }
        }
    }

    // ──────── Key press ────────

    /// Presses one key: steps the rotors, then runs the signal path.
    ///
    /// # Errors
    /// [`EnigmaError::NotConfigured`] before configuration.
    pub fn press_key(&mut self, input: Contact) -> Result<Contact> {
        let machine = self.machine.as_mut().ok_or(EnigmaError::NotConfigured)?;
        let tracer = &mut self.tracer;

        tracer.rotor_positions("rotors before stepping:", &positions(&machine.rotors));
        step_rotors(&mut machine.rotors, machine.model.stepping_rotors);
        tracer.rotor_positions("rotors after stepping:", &positions(&machine.rotors));

        let mut current = input;
        if let Some(plugboard) = machine.plugboard.as_ref() {
            let out = plugboard.get_plug(current);
            tracer.signal(Stage::PlugboardIn, current, out);
            current = out;
        }

        for rotor in machine.rotors.iter().rev() {
            let out = rotor.encrypt_forward(current);
            tracer.signal(Stage::RotorForward(rotor.name()), current, out);
            current = out;
        }

        let out = machine.reflector.encrypt(current);
        tracer.signal(Stage::Reflector(machine.reflector.name()), current, out);
        current = out;

        for rotor in machine.rotors.iter() {
            let out = rotor.encrypt_reverse(current);
            tracer.signal(Stage::RotorReverse(rotor.name()), current, out);
            current = out;
        }

        if let Some(plugboard) = machine.plugboard.as_ref() {
            let out = plugboard.get_plug(current);
            tracer.signal(Stage::PlugboardOut, current, out);
            current = out;
        }

        Ok(current)
    }

    /// Presses the key for `letter` and returns the lit lamp.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidLetter`] for anything outside A-Z (either case),
    /// otherwise as [`SignalPath::press_key`].
    pub fn press_char(&mut self, letter: char) -> Result<char> {
        let contact = Contact::from_char(letter)?;
        Ok(self.press_key(contact)?.to_char())
    }

    /// Types `text` letter by letter and returns the lamp sequence.
    ///
    /// Whitespace is skipped. The text is validated before any key is
    /// pressed, so a rejected text leaves the rotors untouched.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidLetter`] for a character outside A-Z,
    /// [`EnigmaError::NotConfigured`] before configuration.
    pub fn encrypt_text(&mut self, text: &str) -> Result<String> {
        self.machine()?;
        let keys = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(Contact::from_char)
            .collect::<Result<Vec<_>>>()?;

        let mut output = String::with_capacity(keys.len());
        for key in keys {
            output.push(self.press_key(key)?.to_char());
        }
        Ok(output)
    }
}

/// Converts a 1-based slot number to an index into the rotor stack.
fn slot_index(slot: usize, rotor_count: usize) -> Result<usize> {
    if (1..=rotor_count).contains(&slot) {
        Ok(slot - 1)
    } else {
        Err(EnigmaError::InvalidRotorSlot { slot, rotor_count })
    }
}

fn positions(rotors: &[Rotor]) -> Vec<Contact> {
    rotors.iter().map(Rotor::position).collect()
}

/// Advances the rotor stack for one key press.
///
/// The rightmost rotor always steps. Each pawl rests on the ring of the
/// rotor to its right; when that rotor shows its turnover letter the pawl
/// drops into the notch and pushes both rotors, which is what makes a
/// middle rotor sitting at its turnover step twice in a row. Every notch
/// is read before anything moves. Only the `stepping_rotors` rightmost
/// rotors have pawls.
fn step_rotors(rotors: &mut [Rotor], stepping_rotors: usize) {
    let count = rotors.len();
    let stepping = stepping_rotors.min(count);
    if stepping == 0 {
        return;
    }
    let leftmost = count - stepping;

    let mut steps = vec![false; count];
    steps[count - 1] = true;
    for i in (leftmost + 1)..count {
        if rotors[i].will_step_next() {
            steps[i - 1] = true;
            steps[i] = true;
        }
    }

    for (rotor, step) in rotors.iter_mut().zip(steps) {
        if step {
            rotor.step();
        }
    }
}
