//! Regression test parameters and operations

use ximaging_core::Image;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare and report failures (default)
    #[default]
    Compare,
    /// Compare, and also dump compared images to stderr
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current check and every failure
/// seen so far.
pub struct RegParams {
    /// Name of the test (e.g., "convolve")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            self.fail(format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            ));
            false
        } else {
            true
        }
    }

    /// Record a boolean check
    ///
    /// `what` describes the property that should hold.
    pub fn check(&mut self, ok: bool, what: &str) -> bool {
        self.index += 1;
        if !ok {
            self.fail(format!(
                "Failure in {}_reg: check for index {} - {}",
                self.test_name, self.index, what
            ));
        }
        ok
    }

    /// Compare two images for exact pixel equality
    ///
    /// Row padding is ignored, so images with different strides compare
    /// equal when their pixels do.
    ///
    /// # Returns
    ///
    /// `true` if images are identical, `false` otherwise.
    pub fn compare_images(&mut self, expected: &Image, actual: &Image) -> bool {
        self.index += 1;

        if self.display() {
            dump(&format!("{}.{:02} expected", self.test_name, self.index), expected);
            dump(&format!("{}.{:02} actual", self.test_name, self.index), actual);
        }

        if !expected.same_params(actual) {
            self.fail(format!(
                "Failure in {}_reg: image comparison for index {} - parameter mismatch \
                 ({}x{} {:?} vs {}x{} {:?})",
                self.test_name,
                self.index,
                expected.width(),
                expected.height(),
                expected.format(),
                actual.width(),
                actual.height(),
                actual.format()
            ));
            return false;
        }

        for y in 0..expected.height() {
            for x in 0..expected.width() {
                let p1 = expected.pixel(x, y);
                let p2 = actual.pixel(x, y);
                if p1 != p2 {
                    self.fail(format!(
                        "Failure in {}_reg: image comparison for index {} - pixel mismatch \
                         at ({}, {}): {:?} vs {:?}",
                        self.test_name, self.index, x, y, p1, p2
                    ));
                    return false;
                }
            }
        }

        true
    }

    /// Compare two byte arrays
    ///
    /// # Returns
    ///
    /// `true` if data is identical, `false` otherwise.
    pub fn compare_bytes(&mut self, expected: &[u8], actual: &[u8]) -> bool {
        self.index += 1;

        if expected != actual {
            let first = expected
                .iter()
                .zip(actual)
                .position(|(a, b)| a != b)
                .unwrap_or(expected.len().min(actual.len()));
            self.fail(format!(
                "Failure in {}_reg: byte comparison for index {}\n\
                 sizes: {} vs {}, first difference at {}",
                self.test_name,
                self.index,
                expected.len(),
                actual.len(),
                first
            ));
            false
        } else {
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all checks passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all checks have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}

fn dump(label: &str, image: &Image) {
    eprintln!(
        "{}: {}x{} {:?}",
        label,
        image.width(),
        image.height(),
        image.format()
    );
    for y in 0..image.height() {
        eprintln!("  {:?}", image.row(y));
    }
}
