use unitconv::models::{Category, Scale};
use unitconv::service::{ConversionForm, ConverterService};
use unitconv::{
    convert, convert_temperature, format_result, ConversionPolicy, ConvertError, HistoryStore,
    MemoryStore, HISTORY_KEY, HISTORY_LIMIT,
};
use speculate2::speculate;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

speculate! {
    before {
        let store = MemoryStore::new();
        let mut service = ConverterService::new(ConversionPolicy::default(), &store);
    }

    describe "convert" {
        it "converts kilometers to meters" {
            assert_eq!(convert(1.0, Category::Length, "km", "m").unwrap(), 1000.0);
        }

        it "converts meters to miles" {
            assert!(close(convert(1609.34, Category::Length, "m", "mi").unwrap(), 1.0));
        }

        it "converts volume and speed units" {
            assert!(close(convert(1.0, Category::Volume, "m³", "L").unwrap(), 1000.0));
            assert!(close(convert(1.0, Category::Speed, "kn", "m/s").unwrap(), 0.514444));
        }

        it "rejects units from another category" {
            let err = convert(1.0, Category::Mass, "kg", "m").unwrap_err();
            assert!(matches!(err, ConvertError::InvalidUnit(_)));
        }
    }

    describe "convert_temperature" {
        it "matches the fixed points" {
            assert_eq!(convert_temperature(0.0, Scale::Celsius, Scale::Fahrenheit), 32.0);
            assert_eq!(convert_temperature(100.0, Scale::Celsius, Scale::Fahrenheit), 212.0);
            assert_eq!(convert_temperature(0.0, Scale::Celsius, Scale::Kelvin), 273.15);
            assert_eq!(convert_temperature(32.0, Scale::Fahrenheit, Scale::Celsius), 0.0);
        }
    }

    describe "format_result" {
        it "formats like the display" {
            assert_eq!(format_result(0.0), "0");
            assert_eq!(format_result(1_500_000.0), "1.500000e+6");
            assert_eq!(format_result(0.1234567), "0.123457");
            assert_eq!(format_result(2.5), "2.5");
        }
    }

    describe "submit" {
        it "renders the display line" {
            let conversion = service.submit(&ConversionForm::new("1", "km", "m")).expect("conversion failed");
            assert_eq!(conversion.category, Category::Length);
            assert_eq!(conversion.formatted, "1000");
            assert_eq!(conversion.display, "1 km = 1000 m");
        }

        it "uses unit symbols for aliases" {
            let form = ConversionForm::new("100", "C", "f").with_category("temperature");
            let conversion = service.submit(&form).expect("conversion failed");
            assert_eq!(conversion.display, "100 °C = 212 °F");
            assert_eq!(conversion.record.from_unit, "°C");
            assert_eq!(conversion.record.to_unit, "°F");
        }

        it "records the conversion at the front of the history" {
            service.submit(&ConversionForm::new("1", "km", "m")).unwrap();
            service.submit(&ConversionForm::new("2", "kg", "g")).unwrap();

            let history = service.history();
            assert_eq!(history.len(), 2);
            assert_eq!(history[0].category, Category::Mass);
            assert_eq!(history[0].input, 2.0);
            assert_eq!(history[0].result, 2000.0);
            assert_eq!(history[1].category, Category::Length);
        }

        it "keeps only the ten most recent conversions" {
            for n in 1..=11 {
                service.submit(&ConversionForm::new(n.to_string(), "m", "cm")).unwrap();
            }

            let history = service.history();
            assert_eq!(history.len(), HISTORY_LIMIT);
            assert_eq!(history[0].input, 11.0);
            assert_eq!(history[9].input, 2.0);
        }

        it "rejects text input without touching history" {
            let err = service.submit(&ConversionForm::new("abc", "m", "km")).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidInput(_)));
            assert_eq!(err.user_message(), "Please enter a valid number");

            let err = service.submit(&ConversionForm::new("", "m", "km")).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidInput(_)));

            assert!(service.history().is_empty());
            assert_eq!(store.read(HISTORY_KEY).unwrap(), None);
        }

        it "rejects unknown units and categories" {
            let err = service.submit(&ConversionForm::new("1", "m", "parsec")).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidUnit(_)));

            let form = ConversionForm::new("1", "m", "km").with_category("currency");
            let err = service.submit(&form).unwrap_err();
            assert!(matches!(err, ConvertError::InvalidUnit(_)));

            assert!(service.history().is_empty());
        }

        it "rejects a unit outside the named category" {
            let form = ConversionForm::new("1", "m", "km").with_category("mass");
            assert!(service.submit(&form).is_err());
        }

        it "persists through the store" {
            service.submit(&ConversionForm::new("5", "mi", "km")).unwrap();
            let reopened = ConverterService::new(ConversionPolicy::default(), &store);
            assert_eq!(reopened.history().len(), 1);
            assert_eq!(reopened.history()[0].from_unit, "mi");
        }
    }

    describe "negative policy" {
        it "accepts negatives by default" {
            let conversion = service.submit(&ConversionForm::new("-2", "km", "m")).unwrap();
            assert_eq!(conversion.display, "-2 km = -2000 m");
        }

        it "rejects negative lengths when disallowed" {
            let strict_store = MemoryStore::new();
            let mut strict = ConverterService::new(ConversionPolicy { allow_negative: false }, &strict_store);

            let err = strict.submit(&ConversionForm::new("-2", "km", "m")).unwrap_err();
            assert_eq!(err, ConvertError::NegativeValue("length".to_string()));
            assert_eq!(err.user_message(), "Negative values are not allowed for length");
            assert!(strict.history().is_empty());

            let conversion = strict.submit(&ConversionForm::new("-40", "°C", "°F")).unwrap();
            assert_eq!(conversion.formatted, "-40");
        }
    }

    describe "swap" {
        it "swaps units and converts again" {
            let mut form = ConversionForm::new("1000", "m", "km");
            let conversion = service.swap(&mut form).expect("input is numeric").unwrap();
            assert_eq!(form.from, "km");
            assert_eq!(form.to, "m");
            assert_eq!(conversion.display, "1000 km = 1.000000e+6 m");
        }

        it "swaps without converting when the input is not a number" {
            let mut form = ConversionForm::new("", "m", "km");
            assert!(service.swap(&mut form).is_none());
            assert_eq!(form.from, "km");
            assert!(service.history().is_empty());
        }
    }

    describe "select_category" {
        it "resets units to the first two of the category" {
            let mut form = ConversionForm::new("1", "m", "km");
            let category = service.select_category(&mut form, "volume").unwrap();
            assert_eq!(category, Category::Volume);
            assert_eq!(form.from, "L");
            assert_eq!(form.to, "mL");
            assert_eq!(form.category.as_deref(), Some("volume"));
        }
    }

    describe "clear_history" {
        it "empties the history and the store" {
            service.submit(&ConversionForm::new("1", "km", "m")).unwrap();
            service.clear_history().unwrap();

            assert!(service.history().is_empty());
            assert_eq!(store.read(HISTORY_KEY).unwrap(), None);
        }
    }
}
