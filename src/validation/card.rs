use crate::core::error::{CardField, IncorrectCardData};

const CARD_NUMBER_LEN: usize = 16;
const CVV_LEN: usize = 3;

/// Raw payment card fields as typed into the payment form
#[derive(Debug, Clone, Copy)]
pub struct CardForm<'a> {
    pub card_number: &'a str,
    pub card_holder_name: &'a str,
    /// Expected as MM/YY
    pub expiry_date: &'a str,
    pub cvv: &'a str,
}

impl<'a> CardForm<'a> {
    /// Check every field in form order, stopping at the first failure
    pub fn validate(&self) -> Result<(), IncorrectCardData> {
        self.validate_card_number()?;
        self.validate_card_holder_name()?;
        self.validate_expiry_date()?;
        self.validate_cvv()?;
        Ok(())
    }

    fn validate_card_number(&self) -> Result<(), IncorrectCardData> {
        if self.card_number.len() != CARD_NUMBER_LEN {
            return Err(IncorrectCardData::new(
                CardField::CardNumber,
                "must be exactly 16 digits",
            ));
        }

        if !all_digits(self.card_number) {
            return Err(IncorrectCardData::new(
                CardField::CardNumber,
                "must contain only digits",
            ));
        }

        Ok(())
    }

    fn validate_card_holder_name(&self) -> Result<(), IncorrectCardData> {
        if self.card_holder_name.trim().is_empty() {
            return Err(IncorrectCardData::new(
                CardField::CardHolderName,
                "must not be empty",
            ));
        }

        Ok(())
    }

    fn validate_expiry_date(&self) -> Result<(), IncorrectCardData> {
        let bytes = self.expiry_date.as_bytes();

        // MM/YY
        let well_formed = bytes.len() == 5
            && bytes[2] == b'/'
            && bytes[..2].iter().all(u8::is_ascii_digit)
            && bytes[3..].iter().all(u8::is_ascii_digit);
        if !well_formed {
            return Err(IncorrectCardData::new(
                CardField::ExpiryDate,
                "must have the format MM/YY",
            ));
        }

        let month = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        if !(1..=12).contains(&month) {
            return Err(IncorrectCardData::new(
                CardField::ExpiryDate,
                "month must be between 01 and 12",
            ));
        }

        Ok(())
    }

    fn validate_cvv(&self) -> Result<(), IncorrectCardData> {
        if self.cvv.len() != CVV_LEN || !all_digits(self.cvv) {
            return Err(IncorrectCardData::new(
                CardField::Cvv,
                "must be exactly 3 digits",
            ));
        }

        Ok(())
    }
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

/// Validate the raw payment card fields from the payment form
pub fn check_valid_card(
    card_number: &str,
    card_holder_name: &str,
    expiry_date: &str,
    cvv: &str,
) -> Result<(), IncorrectCardData> {
    CardForm {
        card_number,
        card_holder_name,
        expiry_date,
        cvv,
    }
    .validate()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(result: Result<(), IncorrectCardData>) -> CardField {
        result.unwrap_err().field
    }

    #[test]
    fn test_valid_card() {
        assert!(check_valid_card("1111222233334444", "a", "01/24", "174").is_ok());
    }

    #[test]
    fn test_card_number_too_short() {
        let result = check_valid_card("1111222", "a", "01/24", "174");
        assert_eq!(field_of(result), CardField::CardNumber);
    }

    #[test]
    fn test_card_number_with_letter() {
        let result = check_valid_card("111122223333444x", "a", "01/24", "174");
        assert_eq!(field_of(result), CardField::CardNumber);
    }

    #[test]
    fn test_card_number_multibyte_chars_rejected() {
        // 16 bytes but not 16 digits
        let result = check_valid_card("éééééééé", "a", "01/24", "174");
        assert_eq!(field_of(result), CardField::CardNumber);
    }

    #[test]
    fn test_empty_card_holder() {
        let result = check_valid_card("1111222233334444", "", "01/24", "174");
        assert_eq!(field_of(result), CardField::CardHolderName);
    }

    #[test]
    fn test_blank_card_holder() {
        let result = check_valid_card("1111222233334444", "   ", "01/24", "174");
        assert_eq!(field_of(result), CardField::CardHolderName);
    }

    #[test]
    fn test_single_digit_month() {
        let result = check_valid_card("1111222233334444", "a", "1/24", "174");
        assert_eq!(field_of(result), CardField::ExpiryDate);
    }

    #[test]
    fn test_missing_slash() {
        let result = check_valid_card("1111222233334444", "a", "01-24", "174");
        assert_eq!(field_of(result), CardField::ExpiryDate);
    }

    #[test]
    fn test_month_out_of_range() {
        let result = check_valid_card("1111222233334444", "a", "13/24", "174");
        assert_eq!(field_of(result), CardField::ExpiryDate);

        let result = check_valid_card("1111222233334444", "a", "00/24", "174");
        assert_eq!(field_of(result), CardField::ExpiryDate);
    }

    #[test]
    fn test_non_numeric_cvv() {
        let result = check_valid_card("1111222233334444", "a", "01/24", "aaa");
        assert_eq!(field_of(result), CardField::Cvv);
    }

    #[test]
    fn test_cvv_wrong_length() {
        let result = check_valid_card("1111222233334444", "a", "01/24", "1744");
        assert_eq!(field_of(result), CardField::Cvv);

        let result = check_valid_card("1111222233334444", "a", "01/24", "17");
        assert_eq!(field_of(result), CardField::Cvv);
    }

    #[test]
    fn test_first_failing_field_reported() {
        let result = check_valid_card("1", "", "1/24", "aaa");
        assert_eq!(field_of(result), CardField::CardNumber);
    }
}
