use log::debug;
use std::collections::HashMap;

use crate::barcode::hamming::hamming;
use crate::barcode::whitelist::Whitelist;

///////////////////////////////
/// Observed barcodes strictly below this distance from a whitelist entry
/// are corrected to it. 0 is an exact match, 1 a single substitution
pub const CORRECT_MAX_DISTANCE: usize = 2;

///////////////////////////////
/// Corrects observed barcodes against a whitelist, remembering every
/// barcode it has already resolved so repeated observations cost one
/// map lookup instead of a whitelist scan
pub struct BarcodeCorrector<'a> {
    whitelist: &'a Whitelist,
    resolved: HashMap<String, String>,
    n_scans: usize,
}

impl<'a> BarcodeCorrector<'a> {
    pub fn new(whitelist: &'a Whitelist) -> BarcodeCorrector<'a> {
        BarcodeCorrector {
            whitelist,
            resolved: HashMap::new(),
            n_scans: 0,
        }
    }

    ///////////////////////////////
    /// Resolve one observed barcode. Scans the whitelist the first time
    /// a barcode is seen; every later occurrence reuses the stored answer
    pub fn correct(&mut self, observed: &str) -> String {
        if let Some(hit) = self.resolved.get(observed) {
            return hit.clone();
        }

        self.n_scans += 1;
        let corrected = match best_match(self.whitelist, observed) {
            Some((distance, hit)) if distance < CORRECT_MAX_DISTANCE => hit.to_string(),
            // nothing close enough in the whitelist, keep the barcode as-is
            _ => observed.to_string(),
        };

        self.resolved
            .insert(observed.to_string(), corrected.clone());
        corrected
    }

    ///////////////////////////////
    /// How many whitelist scans were performed, i.e. how many distinct
    /// barcodes were observed
    pub fn n_scans(&self) -> usize {
        self.n_scans
    }
}

///////////////////////////////
/// Closest whitelist entry and its distance. Ties at the minimum resolve
/// to the first entry in whitelist order, which is sorted
fn best_match<'w>(whitelist: &'w Whitelist, observed: &str) -> Option<(usize, &'w str)> {
    let mut best: Option<(usize, &'w str)> = None;
    for entry in whitelist.iter() {
        let distance = hamming(observed.as_bytes(), entry.as_bytes());
        match best {
            Some((m, _)) if distance >= m => {}
            _ => best = Some((distance, entry)),
        }
    }
    best
}

///////////////////////////////
/// Correct a list of observed barcodes, preserving order and
/// multiplicity. The caller is expected to skip this entirely for an
/// empty whitelist
pub fn correct_barcodes(observed: &[String], whitelist: &Whitelist) -> Vec<String> {
    let mut corrector = BarcodeCorrector::new(whitelist);
    let corrected = observed.iter().map(|bc| corrector.correct(bc)).collect();
    debug!(
        "Corrected {} barcodes ({} distinct)",
        observed.len(),
        corrector.n_scans()
    );
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn whitelist(src: &str) -> Whitelist {
        Whitelist::from_reader(Cursor::new(src)).unwrap()
    }

    fn observed(bcs: &[&str]) -> Vec<String> {
        bcs.iter().map(|bc| bc.to_string()).collect()
    }

    #[test]
    fn test_correct_mixed_observations() {
        // AAAT is one substitution from AAAA; GGGG is far from everything
        let wl = whitelist("AAAA\nCCCC\n");
        let corrected = correct_barcodes(&observed(&["AAAA", "AAAT", "GGGG", "CCCC"]), &wl);
        assert_eq!(corrected, observed(&["AAAA", "AAAA", "GGGG", "CCCC"]));
    }

    #[test]
    fn test_correct_whitelisted_barcode_unchanged() {
        let wl = whitelist("AAAA\nCCCC\nGGGG\n");
        let corrected = correct_barcodes(&observed(&["CCCC"]), &wl);
        assert_eq!(corrected, observed(&["CCCC"]));
    }

    #[test]
    fn test_correct_scans_once_per_distinct_barcode() {
        let wl = whitelist("AAAA\nCCCC\n");
        let mut corrector = BarcodeCorrector::new(&wl);
        let a = corrector.correct("AAAT");
        let b = corrector.correct("AAAT");
        let c = corrector.correct("AAAT");
        assert_eq!(a, "AAAA");
        assert_eq!(b, a);
        assert_eq!(c, a);
        assert_eq!(corrector.n_scans(), 1);

        corrector.correct("CCCC");
        assert_eq!(corrector.n_scans(), 2);
    }

    #[test]
    fn test_correct_ambiguous_entry_never_matches() {
        // NNNN would be the closest match for NNNA but is dropped on load
        let wl = whitelist("NNNN\nAAAA\n");
        let corrected = correct_barcodes(&observed(&["NNNA"]), &wl);
        assert_eq!(corrected, observed(&["NNNA"]));
    }

    #[test]
    fn test_correct_length_mismatch_unchanged() {
        let wl = whitelist("AAAA\n");
        let corrected = correct_barcodes(&observed(&["AAAAA"]), &wl);
        assert_eq!(corrected, observed(&["AAAAA"]));
    }

    #[test]
    fn test_correct_tie_takes_first_sorted_entry() {
        // AAAC is one substitution from both AAAA and CAAC
        let wl = whitelist("CAAC\nAAAA\n");
        let corrected = correct_barcodes(&observed(&["AAAC"]), &wl);
        assert_eq!(corrected, observed(&["AAAA"]));
    }
}
